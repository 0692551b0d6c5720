//! # Session — One Recording Day
//!
//! A [`Session`] references a [`Subject`](crate::Subject) by id and one
//! entry of its configuration history, and carries everything that varies
//! per day: session metadata, tasks and their epochs, behavioral events,
//! associated files, technical acquisition parameters, and optional device
//! overrides.
//!
//! Overrides follow replace-not-merge semantics: a field of
//! [`DeviceOverrides`] that is `Some` replaces the subject/configuration
//! default wholesale, even when the override is an empty list. A field that
//! is `None` falls through to the default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hardware::{ChannelMap, ElectrodeGroup};
use crate::subject::CameraDevice;

/// A behavioral task run during the session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    pub task_name: String,
    pub task_description: String,
    #[serde(default)]
    pub task_environment: String,
    /// Cameras recording this task; empty when untracked.
    #[serde(default)]
    pub camera_id: Vec<u32>,
    /// Epoch ids this task spans.
    #[serde(default)]
    pub task_epochs: Vec<u32>,
}

/// A named event channel on the acquisition system.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BehavioralEvent {
    pub description: String,
    pub name: String,
}

/// A non-video file associated with the session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssociatedFile {
    pub name: String,
    pub description: String,
    pub path: String,
    /// Epochs the file belongs to; may be empty.
    #[serde(default)]
    pub task_epochs: Vec<u32>,
}

/// A video file associated with the session, tied to a camera.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssociatedVideoFile {
    pub name: String,
    /// Cameras that produced the footage; empty when unknown.
    #[serde(default)]
    pub camera_id: Vec<u32>,
    #[serde(default)]
    pub task_epochs: Vec<u32>,
}

/// Unit labels for acquisition streams.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Units {
    pub analog: String,
    pub behavioral_events: String,
}

/// Technical acquisition parameters copied verbatim into the record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TechnicalParams {
    pub units: Units,
    pub times_period_multiplier: f64,
    pub raw_data_to_volts: f64,
    pub default_header_file_path: String,
}

/// Per-session device overrides. Each `Some` field replaces the default
/// wholesale; `Some(vec![])` is an explicit empty override, not a fallback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeviceOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cameras: Option<Vec<CameraDevice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electrode_groups: Option<Vec<ElectrodeGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_map: Option<Vec<ChannelMap>>,
}

/// One recording day for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,
    /// Back-reference to the owning subject; not ownership.
    pub subject_id: String,
    /// Reference into the subject's configuration history. `None` falls
    /// back per `resolve_configuration_version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_version: Option<u32>,
    pub session_id: String,
    pub session_description: String,
    pub experiment_description: String,
    /// Grams; overrides the subject's default weight when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_weight: Option<f64>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub behavioral_events: Vec<BehavioralEvent>,
    #[serde(default)]
    pub associated_files: Vec<AssociatedFile>,
    #[serde(default)]
    pub associated_video_files: Vec<AssociatedVideoFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_overrides: Option<DeviceOverrides>,
    pub technical: TechnicalParams,
    /// Extended-protocol records; included in the export only when the
    /// session defines a non-empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_protocols: Option<Vec<Value>>,
}
