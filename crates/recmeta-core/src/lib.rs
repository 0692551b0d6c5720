//! # recmeta-core — Foundational Types for the recmeta Stack
//!
//! This crate is the leaf of the workspace DAG. It defines the data model
//! shared by the merge engine, both validators, and the channel-map codec:
//!
//! 1. **Authoring-side records.** [`Subject`] owns reusable per-animal
//!    defaults plus an append-only `configuration_history` of versioned
//!    hardware snapshots; [`Session`] references a subject and one
//!    [`ConfigurationVersion`] and carries per-day overrides.
//!
//! 2. **Hardware wiring.** [`ElectrodeGroup`] and [`ChannelMap`] describe
//!    implanted probes and their logical-to-physical channel wiring.
//!    Channel maps use `BTreeMap`/`BTreeSet` so iteration order is
//!    deterministic everywhere issues or text rows are produced from them.
//!
//! 3. **The flattened export record.** [`FlattenedRecord`] is the transient,
//!    schema-shaped output of the merge. It owns all of its data — cloning
//!    a subject or session into it is a deep copy by construction, so the
//!    record can never alias its sources.
//!
//! 4. **The Issue model.** [`Issue`] is the single finding type produced by
//!    both the structural and the semantic validator. Immutable value type;
//!    produced, never mutated.
//!
//! ## Absence vs. emptiness
//!
//! Every field where "not configured" and "configured as empty" are
//! distinct states is an `Option<Vec<_>>`, and optional sections of
//! [`FlattenedRecord`] carry `skip_serializing_if` so the serialized record
//! preserves the distinction. `Some(vec![])` is an explicit empty override
//! and must never be collapsed into `None`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `recmeta-*` crates.
//! - No `unsafe` code, no `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, `Serialize`, `Deserialize`.

pub mod hardware;
pub mod issue;
pub mod record;
pub mod session;
pub mod subject;

pub use hardware::{ChannelMap, ConfigurationVersion, ElectrodeGroup};
pub use issue::{codes, Issue, Severity};
pub use record::FlattenedRecord;
pub use session::{
    AssociatedFile, AssociatedVideoFile, BehavioralEvent, DeviceOverrides, Session, Task,
    TechnicalParams, Units,
};
pub use subject::{CameraDevice, DataAcqDevice, OptogeneticsBlock, Subject, SubjectFacts};
