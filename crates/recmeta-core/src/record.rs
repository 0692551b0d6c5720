//! # FlattenedRecord — The Merged, Exportable Record
//!
//! The single schema-shaped record computed from subject defaults, the
//! selected configuration version, and the session. Transient: produced on
//! every validate/export trigger, handed to the validators and the text
//! serializer, never persisted.
//!
//! The struct serializes to the exact shape the downstream conversion
//! pipeline pins on. Optional sections carry `skip_serializing_if` so a
//! section the owning record never defined is absent from the output, not
//! `null` and not an empty list. Changing any field name or the presence
//! rules here is a coordinated schema-version bump, not a local edit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hardware::{ChannelMap, ElectrodeGroup};
use crate::session::{AssociatedFile, AssociatedVideoFile, BehavioralEvent, Task, Units};
use crate::subject::{CameraDevice, DataAcqDevice, SubjectFacts};

/// The flattened, exportable metadata record.
///
/// Owns all of its data; the merger deep-copies from its sources, so
/// mutating a returned record can never reach back into the subject or the
/// session it was computed from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlattenedRecord {
    pub experimenter_name: Vec<String>,
    pub lab: String,
    pub institution: String,
    pub experiment_description: String,
    pub session_description: String,
    pub session_id: String,
    pub subject: SubjectFacts,
    pub data_acq_device: Vec<DataAcqDevice>,
    /// Absent when neither the subject nor the session defines cameras.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cameras: Option<Vec<CameraDevice>>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub associated_files: Vec<AssociatedFile>,
    #[serde(default)]
    pub associated_video_files: Vec<AssociatedVideoFile>,
    #[serde(default)]
    pub behavioral_events: Vec<BehavioralEvent>,
    pub units: Units,
    pub times_period_multiplier: f64,
    pub raw_data_to_volts: f64,
    pub default_header_file_path: String,
    #[serde(default)]
    pub electrode_groups: Vec<ElectrodeGroup>,
    #[serde(default)]
    pub ntrode_electrode_group_channel_map: Vec<ChannelMap>,
    /// Optogenetics group: present only when the subject defines the block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opto_excitation_source: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optical_fiber: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virus_injection: Option<Vec<Value>>,
    /// Present only when the session defines a non-empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_protocols: Option<Vec<Value>>,
}
