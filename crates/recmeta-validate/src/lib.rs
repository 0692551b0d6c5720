//! # recmeta-validate — Validation Orchestrator
//!
//! One call, every finding. [`validate_all`] runs the structural schema
//! validator and the semantic rules validator unconditionally — neither
//! short-circuits the other, so a consumer always sees every category of
//! problem in a single pass — and unifies their output into one issue list
//! plus an index of affected record sections.
//!
//! ## Ordering
//!
//! Identical input yields an identical issue list on every call: schema
//! issues first, in the order the compiled validator reports them, then
//! rule issues in the rules crate's fixed order. Consumers snapshot and
//! highlight against exactly this order.

use std::collections::BTreeSet;

use recmeta_core::{FlattenedRecord, Issue};
use recmeta_schema::{SchemaError, SchemaValidator};

/// Unified outcome of one validation pass.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// True when the record produced no issue of any kind.
    pub is_valid: bool,
    /// Schema issues first, then rule issues.
    pub issues: Vec<Issue>,
    /// First path segment of every issue; the record sections a UI marks.
    pub error_ids: BTreeSet<String>,
}

/// Run both validators over a flattened record.
///
/// The schema handle is constructed once by the caller and passed in by
/// reference; compilation cost is paid once, not per record.
///
/// # Errors
///
/// Only [`SchemaError::Serialize`] when the record cannot be converted to
/// a JSON value — a programming fault, never a data error. Data problems
/// are always reported inside the returned [`ValidationOutcome`].
pub fn validate_all(
    schema: &SchemaValidator,
    record: &FlattenedRecord,
) -> Result<ValidationOutcome, SchemaError> {
    let as_json = serde_json::to_value(record)?;

    let mut issues = schema.validate(&as_json).issues;
    issues.extend(recmeta_rules::validate(record));

    let error_ids = issues
        .iter()
        .map(|issue| issue.group_id().to_string())
        .collect();

    Ok(ValidationOutcome {
        is_valid: issues.is_empty(),
        issues,
        error_ids,
    })
}
