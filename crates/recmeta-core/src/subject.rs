//! # Subject — Reusable Per-Animal Defaults
//!
//! A [`Subject`] is authored once in the workspace editor and reused across
//! many sessions. It owns the biological facts, the lab identity, the
//! default acquisition devices and cameras, an optional optogenetics block,
//! and the append-only history of hardware configurations.
//!
//! Sessions reference a subject; they never own or mutate one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hardware::ConfigurationVersion;

/// A data acquisition system used for recording.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataAcqDevice {
    pub name: String,
    pub system: String,
    pub amplifier: String,
    pub adc_circuitry: String,
}

/// A behavior-tracking camera.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Referenced by tasks and video files via `camera_id`.
    pub id: u32,
    pub meters_per_pixel: f64,
    pub manufacturer: String,
    pub model: String,
    pub lens: String,
    pub camera_name: String,
}

/// Optogenetics configuration carried by a subject.
///
/// The three fields form an all-or-nothing group in the exported record:
/// either none is configured or all three are non-empty. The engine treats
/// the entries as opaque documents; their internal shape is the schema's
/// business, their joint presence is the rules validator's.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptogeneticsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opto_excitation_source: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optical_fiber: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virus_injection: Option<Vec<Value>>,
}

/// Biological facts about the animal, nested under `subject` in the
/// exported record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubjectFacts {
    pub subject_id: String,
    pub description: String,
    pub genotype: String,
    pub sex: String,
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Grams. Sessions may override per day.
    pub weight: f64,
}

/// Reusable per-animal defaults plus the versioned hardware history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subject {
    /// Biological facts copied into every exported record.
    pub facts: SubjectFacts,
    /// People responsible for the recordings, `"Last, First"` form.
    pub experimenter_name: Vec<String>,
    pub lab: String,
    pub institution: String,
    /// Default acquisition devices; copied unconditionally into the record.
    pub data_acq_device: Vec<DataAcqDevice>,
    /// Default cameras; a session override replaces this wholesale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cameras: Option<Vec<CameraDevice>>,
    /// Present only when the subject has optogenetics hardware configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optogenetics: Option<OptogeneticsBlock>,
    /// Ordered, append-only. Entries are immutable once referenced.
    #[serde(default)]
    pub configuration_history: Vec<ConfigurationVersion>,
}
