//! # recmeta-schema — Structural Validation
//!
//! Wraps a declarative JSON Schema (Draft 2020-12) behind a handle that is
//! compiled once and reused for every record. Each structural violation —
//! missing required key, wrong type, pattern mismatch, numeric bound or
//! array-cardinality violation — becomes one [`Issue`] with severity
//! `error`, addressed by the violating instance path.
//!
//! ## Fault model
//!
//! Data problems never raise: they are reported as issues in a
//! [`SchemaReport`]. A malformed schema *document* is a configuration
//! fault: [`SchemaValidator::new`] fails and the caller must abort rather
//! than silently validate nothing.
//!
//! The schema document itself is injected by the caller; this crate never
//! decides which schema version applies. The bundled copy under `schemas/`
//! at the workspace root exists for the CLI and the integration tests.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use recmeta_core::{codes, Issue};

/// Error constructing or driving a [`SchemaValidator`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document itself is malformed. Fatal: abort startup.
    #[error("schema compile error: {reason}")]
    Compile {
        /// Reason the schema could not be compiled.
        reason: String,
    },

    /// The schema file could not be read or parsed.
    #[error("schema load error for '{path}': {reason}")]
    Load {
        /// Path to the schema document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// A record could not be converted to a JSON value for validation.
    #[error("record serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A single structural violation with the raw validator context retained
/// for advanced consumers. `path`/`code`/`message` on the derived
/// [`Issue`] form the stable contract; `schema_path` does not.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Outcome of one structural validation pass.
#[derive(Debug, Clone)]
pub struct SchemaReport {
    /// True when no violation was found.
    pub valid: bool,
    /// One issue per violation, in the order the validator reported them.
    pub issues: Vec<Issue>,
    /// Raw violations, index-aligned with `issues`.
    pub violations: Vec<Violation>,
}

/// A compiled schema handle.
///
/// Compiles the injected schema document once at construction and reuses
/// the compiled validator for every [`validate`](Self::validate) call.
/// `Send + Sync`; share one handle across many records.
pub struct SchemaValidator {
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a schema document into a reusable validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] when the document is not a valid
    /// Draft 2020-12 schema. Treat this as fatal: a caller that ignores it
    /// would validate nothing.
    pub fn new(schema: &Value) -> Result<Self, SchemaError> {
        let mut options = jsonschema::options();
        options.with_draft(jsonschema::Draft::Draft202012);
        let validator = options.build(schema).map_err(|e| SchemaError::Compile {
            reason: e.to_string(),
        })?;
        Ok(Self { validator })
    }

    /// Load a schema document from a JSON file and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] when the file cannot be read or is not
    /// JSON, and [`SchemaError::Compile`] when it is not a valid schema.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Load {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
        Self::new(&schema)
    }

    /// Validate a record against the compiled schema.
    ///
    /// Never fails: every structural problem becomes an issue whose `path`
    /// is the instance path with the leading `/` stripped, so the first
    /// path segment addresses the record section the violation lives in.
    pub fn validate(&self, record: &Value) -> SchemaReport {
        let mut issues = Vec::new();
        let mut violations = Vec::new();

        for error in self.validator.iter_errors(record) {
            let instance_path = error.instance_path.to_string();
            let message = error.to_string();
            issues.push(Issue::error(
                instance_path.trim_start_matches('/'),
                codes::SCHEMA_VIOLATION,
                message.clone(),
            ));
            violations.push(Violation {
                instance_path,
                schema_path: error.schema_path.to_string(),
                message,
            });
        }

        SchemaReport {
            valid: issues.is_empty(),
            issues,
            violations,
        }
    }
}
