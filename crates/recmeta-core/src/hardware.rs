//! # Hardware Configuration — Electrode Groups and Channel Maps
//!
//! A [`ConfigurationVersion`] is an immutable snapshot of a subject's
//! implanted hardware: the electrode groups and the ntrode channel maps
//! wiring logical channels to physical acquisition channels. A subject's
//! `configuration_history` is append-only; once a session references a
//! version, new wiring means a new version, never an in-place edit.
//!
//! ## Wiring invariants (checked by the rules validator, not here)
//!
//! - Ntrode ids are unique within one version; every channel map's
//!   `electrode_group_id` resolves to a group in the same version.
//! - Within one map, physical values are unique and logical keys form the
//!   contiguous range `[0..max]`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// An implanted electrode group (probe or tetrode bundle).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElectrodeGroup {
    /// Unique within the owning [`ConfigurationVersion`].
    pub id: u32,
    /// Anatomical recording location.
    pub location: String,
    /// Probe hardware type; implies the expected channel/shank count.
    pub device_type: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Stereotaxic target, if planned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeted_location: Option<String>,
    /// Target coordinates in `units`.
    #[serde(default)]
    pub targeted_x: f64,
    #[serde(default)]
    pub targeted_y: f64,
    #[serde(default)]
    pub targeted_z: f64,
    /// Coordinate units, e.g. `"mm"`.
    #[serde(default)]
    pub units: String,
}

/// Logical-to-physical channel wiring for one ntrode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelMap {
    /// Unique within the owning [`ConfigurationVersion`].
    pub ntrode_id: u32,
    /// Must resolve to an [`ElectrodeGroup`] in the same version.
    pub electrode_group_id: u32,
    /// Hardware electrode identifier carried through the text codec.
    #[serde(default)]
    pub electrode_id: i32,
    /// Logical channels marked bad; keys into `map`.
    #[serde(default)]
    pub bad_channels: BTreeSet<u32>,
    /// Logical channel → physical acquisition channel.
    pub map: BTreeMap<u32, u32>,
}

impl ChannelMap {
    /// Physical values that appear more than once in `map`, each listed
    /// once, ascending.
    pub fn duplicate_physical_channels(&self) -> Vec<u32> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for phys in self.map.values() {
            *counts.entry(*phys).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(phys, _)| phys)
            .collect()
    }

    /// Logical channels absent from `[0, max]`, ascending. Empty for an
    /// empty or contiguous map.
    pub fn missing_logical_channels(&self) -> Vec<u32> {
        let Some(max) = self.map.keys().next_back().copied() else {
            return Vec::new();
        };
        (0..=max).filter(|ch| !self.map.contains_key(ch)).collect()
    }
}

/// An immutable snapshot of a subject's hardware wiring.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigurationVersion {
    /// Monotonic within the subject's history.
    pub version: u32,
    /// Electrode groups implanted under this configuration.
    pub electrode_groups: Vec<ElectrodeGroup>,
    /// One entry per ntrode.
    pub channel_map: Vec<ChannelMap>,
}

impl ConfigurationVersion {
    /// Look up an electrode group by id.
    pub fn electrode_group(&self, id: u32) -> Option<&ElectrodeGroup> {
        self.electrode_groups.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(u32, u32)]) -> ChannelMap {
        ChannelMap {
            ntrode_id: 1,
            electrode_group_id: 0,
            electrode_id: 0,
            bad_channels: BTreeSet::new(),
            map: pairs.iter().copied().collect(),
        }
    }

    #[test]
    fn test_duplicates_listed_once_each() {
        let cm = map_of(&[(0, 5), (1, 5), (2, 6), (3, 6), (4, 7)]);
        assert_eq!(cm.duplicate_physical_channels(), vec![5, 6]);
    }

    #[test]
    fn test_unique_map_has_no_duplicates() {
        let cm = map_of(&[(0, 5), (1, 6), (2, 7)]);
        assert!(cm.duplicate_physical_channels().is_empty());
    }

    #[test]
    fn test_missing_channels_within_range() {
        let cm = map_of(&[(0, 0), (2, 2), (5, 5)]);
        assert_eq!(cm.missing_logical_channels(), vec![1, 3, 4]);
    }

    #[test]
    fn test_contiguous_map_has_no_gaps() {
        let cm = map_of(&[(0, 3), (1, 2), (2, 1), (3, 0)]);
        assert!(cm.missing_logical_channels().is_empty());
    }

    #[test]
    fn test_empty_map_has_no_gaps() {
        let cm = map_of(&[]);
        assert!(cm.missing_logical_channels().is_empty());
        assert!(cm.duplicate_physical_channels().is_empty());
    }

    #[test]
    fn test_electrode_group_lookup() {
        let version = ConfigurationVersion {
            version: 1,
            electrode_groups: vec![
                ElectrodeGroup {
                    id: 0,
                    location: "CA1".into(),
                    device_type: "tetrode_12.5".into(),
                    ..Default::default()
                },
                ElectrodeGroup {
                    id: 3,
                    location: "mPFC".into(),
                    device_type: "A1x32-6mm-50-177-H32_21mm".into(),
                    ..Default::default()
                },
            ],
            channel_map: vec![],
        };
        assert_eq!(version.electrode_group(3).unwrap().location, "mPFC");
        assert!(version.electrode_group(7).is_none());
    }
}
