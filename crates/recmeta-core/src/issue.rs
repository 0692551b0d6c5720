//! # Issue — The Unit of Validation Output
//!
//! Both validators report findings as [`Issue`] values: an addressable
//! path, a stable machine code, a severity, and a human-readable message.
//! Consumers group issues by the first path segment to map them onto
//! sections of the record without parsing messages.
//!
//! Issues are immutable: a validator builds them once and hands them out;
//! nothing downstream rewrites path, code, or message.

use serde::{Deserialize, Serialize};

/// Stable machine-readable issue codes.
///
/// These are part of the consumer contract: a code never changes meaning,
/// and message text may be reworded without a version bump as long as the
/// code and path stay stable.
pub mod codes {
    /// Structural schema violation (missing key, wrong type, bad pattern,
    /// numeric bound or cardinality violation).
    pub const SCHEMA_VIOLATION: &str = "schema_violation";
    /// A task or video file references a camera but no cameras are defined.
    pub const MISSING_CAMERA: &str = "missing_camera";
    /// Only part of the optogenetics field group is present.
    pub const PARTIAL_CONFIGURATION: &str = "partial_configuration";
    /// A channel map wires the same physical channel more than once.
    pub const DUPLICATE_CHANNELS: &str = "duplicate_channels";
    /// A channel map's logical channels are not contiguous from zero.
    pub const MISSING_CHANNELS: &str = "missing_channels";
}

/// Severity of a validation finding.
///
/// The engine currently emits only [`Severity::Error`]; `Warning` exists so
/// the consumer contract does not change when advisory findings are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks export.
    Error,
    /// Advisory only.
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Addressable location, e.g. `"tasks"` or `"electrode_groups/0/location"`.
    pub path: String,
    /// Stable machine code from [`codes`].
    pub code: String,
    /// Finding severity.
    pub severity: Severity,
    /// Human-readable description, presented verbatim to the user.
    pub message: String,
}

impl Issue {
    /// Build an error-severity issue.
    pub fn error(path: impl Into<String>, code: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            code: code.to_string(),
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// The first path segment, used to group issues by record section.
    ///
    /// `"electrode_groups/0/location"` groups under `"electrode_groups"`;
    /// a root-level issue (empty path) groups under `"root"`.
    pub fn group_id(&self) -> &str {
        let head = self.path.split('/').next().unwrap_or("");
        if head.is_empty() {
            "root"
        } else {
            head
        }
    }
}
