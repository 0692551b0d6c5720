//! # recmeta-merge — Subject + Configuration + Session ⇒ FlattenedRecord
//!
//! Computes the single exportable record from the three-layer inheritance
//! model: reusable subject defaults, one versioned hardware configuration
//! out of the subject's history, and per-session overrides.
//!
//! ## Contract
//!
//! [`merge`] is a pure function. It never fails for well-typed input,
//! performs no I/O, and returns a fully owned [`FlattenedRecord`] — every
//! value is deep-copied out of the inputs, so the result never aliases the
//! subject or the session. Calling it twice on unmutated inputs yields
//! deep-equal results.
//!
//! ## Override semantics
//!
//! A session override wins only when it is *explicitly set*: the override
//! container defines the field (`Some`), even as an empty list. An unset
//! field (`None`) falls through to the subject/configuration default, never
//! to an empty or zero value. Replacement is wholesale — overrides are
//! never merged element-wise with the default they shadow.

use recmeta_core::{ConfigurationVersion, FlattenedRecord, Session, Subject};

/// Select the configuration version a session records against.
///
/// Resolution order: the entry whose `version` equals `requested`, else the
/// last entry of the history, else the first. For a non-empty history the
/// last two arms coincide; the chain is kept explicit because consumers
/// depend on exactly this order when a session references a version that
/// was never appended. Returns `None` only for an empty history.
pub fn resolve_configuration_version(
    history: &[ConfigurationVersion],
    requested: Option<u32>,
) -> Option<&ConfigurationVersion> {
    if let Some(version) = requested {
        if let Some(exact) = history.iter().find(|c| c.version == version) {
            return Some(exact);
        }
    }
    history.last().or_else(|| history.first())
}

/// Compute the flattened, exportable record for one session.
///
/// Shape- and value-compatible with a flat single-record editor producing
/// the same final values; the downstream pipeline cannot tell the two
/// apart. See the module docs for the override semantics.
pub fn merge(subject: &Subject, session: &Session) -> FlattenedRecord {
    let config = resolve_configuration_version(
        &subject.configuration_history,
        session.configuration_version,
    );
    let overrides = session.device_overrides.as_ref();

    let mut facts = subject.facts.clone();
    if let Some(weight) = session.subject_weight {
        facts.weight = weight;
    }

    let cameras = match overrides.and_then(|o| o.cameras.clone()) {
        Some(explicit) => Some(explicit),
        None => subject.cameras.clone(),
    };

    let electrode_groups = overrides
        .and_then(|o| o.electrode_groups.clone())
        .or_else(|| config.map(|c| c.electrode_groups.clone()))
        .unwrap_or_default();

    let channel_map = overrides
        .and_then(|o| o.channel_map.clone())
        .or_else(|| config.map(|c| c.channel_map.clone()))
        .unwrap_or_default();

    let (opto_excitation_source, optical_fiber, virus_injection) = match &subject.optogenetics {
        Some(block) => (
            block.opto_excitation_source.clone(),
            block.optical_fiber.clone(),
            block.virus_injection.clone(),
        ),
        None => (None, None, None),
    };

    FlattenedRecord {
        experimenter_name: subject.experimenter_name.clone(),
        lab: subject.lab.clone(),
        institution: subject.institution.clone(),
        experiment_description: session.experiment_description.clone(),
        session_description: session.session_description.clone(),
        session_id: session.session_id.clone(),
        subject: facts,
        data_acq_device: subject.data_acq_device.clone(),
        cameras,
        tasks: session.tasks.clone(),
        associated_files: session.associated_files.clone(),
        associated_video_files: session.associated_video_files.clone(),
        behavioral_events: session.behavioral_events.clone(),
        units: session.technical.units.clone(),
        times_period_multiplier: session.technical.times_period_multiplier,
        raw_data_to_volts: session.technical.raw_data_to_volts,
        default_header_file_path: session.technical.default_header_file_path.clone(),
        electrode_groups,
        ntrode_electrode_group_channel_map: channel_map,
        opto_excitation_source,
        optical_fiber,
        virus_injection,
        extended_protocols: session
            .extended_protocols
            .as_ref()
            .filter(|records| !records.is_empty())
            .cloned(),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{config, session, subject};
    use super::*;
    use recmeta_core::{ChannelMap, DeviceOverrides, OptogeneticsBlock};

    #[test]
    fn test_resolve_exact_match() {
        let history = vec![config(1), config(2), config(3)];
        let hit = resolve_configuration_version(&history, Some(2)).unwrap();
        assert_eq!(hit.version, 2);
    }

    #[test]
    fn test_resolve_unknown_version_falls_back_to_last() {
        let history = vec![config(1), config(2), config(3)];
        let hit = resolve_configuration_version(&history, Some(99)).unwrap();
        assert_eq!(hit.version, 3);
    }

    #[test]
    fn test_resolve_unspecified_falls_back_to_last() {
        let history = vec![config(1), config(2)];
        let hit = resolve_configuration_version(&history, None).unwrap();
        assert_eq!(hit.version, 2);
    }

    #[test]
    fn test_resolve_empty_history() {
        assert!(resolve_configuration_version(&[], Some(1)).is_none());
        assert!(resolve_configuration_version(&[], None).is_none());
    }

    #[test]
    fn test_merge_copies_subject_and_session_fields() {
        let record = merge(&subject(), &session());
        assert_eq!(record.lab, "Loren Frank");
        assert_eq!(record.experimenter_name, vec!["Guidera, Jennifer"]);
        assert_eq!(record.session_id, "RN2_20230622");
        assert_eq!(record.experiment_description, "hippocampal replay");
        assert_eq!(record.subject.weight, 450.0);
        assert_eq!(record.times_period_multiplier, 1.5);
        // Configuration version 2 was selected.
        assert_eq!(record.ntrode_electrode_group_channel_map[0].ntrode_id, 2);
    }

    #[test]
    fn test_merge_weight_override_wins() {
        let mut day = session();
        day.subject_weight = Some(462.5);
        let record = merge(&subject(), &day);
        assert_eq!(record.subject.weight, 462.5);
    }

    #[test]
    fn test_merge_camera_fallback_to_subject() {
        // device_overrides present but cameras unset: fall through.
        let mut day = session();
        day.device_overrides = Some(DeviceOverrides::default());
        let record = merge(&subject(), &day);
        assert_eq!(record.cameras, subject().cameras);
    }

    #[test]
    fn test_merge_explicit_empty_camera_override_wins() {
        let mut day = session();
        day.device_overrides = Some(DeviceOverrides {
            cameras: Some(vec![]),
            ..Default::default()
        });
        let record = merge(&subject(), &day);
        assert_eq!(record.cameras, Some(vec![]));
    }

    #[test]
    fn test_merge_channel_map_override_replaces_configuration() {
        let replacement = vec![ChannelMap {
            ntrode_id: 7,
            electrode_group_id: 0,
            electrode_id: 0,
            bad_channels: Default::default(),
            map: [(0, 10)].into_iter().collect(),
        }];
        let mut day = session();
        day.device_overrides = Some(DeviceOverrides {
            channel_map: Some(replacement.clone()),
            ..Default::default()
        });
        let record = merge(&subject(), &day);
        assert_eq!(record.ntrode_electrode_group_channel_map, replacement);
    }

    #[test]
    fn test_merge_optogenetics_absent_without_subject_block() {
        let record = merge(&subject(), &session());
        assert!(record.opto_excitation_source.is_none());
        assert!(record.optical_fiber.is_none());
        assert!(record.virus_injection.is_none());
    }

    #[test]
    fn test_merge_optogenetics_present_when_subject_defines_block() {
        let mut animal = subject();
        animal.optogenetics = Some(OptogeneticsBlock {
            opto_excitation_source: Some(vec![serde_json::json!({"name": "laser"})]),
            optical_fiber: Some(vec![serde_json::json!({"name": "fiber"})]),
            virus_injection: Some(vec![serde_json::json!({"name": "virus"})]),
        });
        let record = merge(&animal, &session());
        assert!(record.opto_excitation_source.is_some());
        assert!(record.optical_fiber.is_some());
        assert!(record.virus_injection.is_some());
    }

    #[test]
    fn test_merge_empty_extended_protocols_treated_as_absent() {
        let mut day = session();
        day.extended_protocols = Some(vec![]);
        let record = merge(&subject(), &day);
        assert!(record.extended_protocols.is_none());

        day.extended_protocols = Some(vec![serde_json::json!({"epoch": 2})]);
        let record = merge(&subject(), &day);
        assert_eq!(record.extended_protocols.unwrap().len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent_and_does_not_alias() {
        let animal = subject();
        let day = session();
        let first = merge(&animal, &day);
        let second = merge(&animal, &day);
        assert_eq!(first, second);

        // Mutating the output must not reach back into the inputs.
        let mut mutated = first;
        mutated.subject.weight = 0.0;
        if let Some(cameras) = mutated.cameras.as_mut() {
            cameras.clear();
        }
        assert_eq!(animal.facts.weight, 450.0);
        assert_eq!(animal.cameras.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_merge_with_empty_history_yields_empty_hardware() {
        let mut animal = subject();
        animal.configuration_history.clear();
        let record = merge(&animal, &session());
        assert!(record.electrode_groups.is_empty());
        assert!(record.ntrode_electrode_group_channel_map.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::fixtures::{session, subject};
    use super::*;
    use proptest::prelude::*;
    use recmeta_core::{CameraDevice, DeviceOverrides};

    fn camera(id: u32) -> CameraDevice {
        CameraDevice {
            id,
            meters_per_pixel: 0.001,
            manufacturer: "m".into(),
            model: "m".into(),
            lens: "l".into(),
            camera_name: format!("cam{id}"),
        }
    }

    proptest! {
        /// The camera override contract: `None` falls through to the
        /// subject by value, any `Some` (including empty) replaces it.
        #[test]
        fn camera_override_replaces_or_falls_through(
            subject_has_cameras in any::<bool>(),
            override_cameras in proptest::option::of(proptest::collection::vec(0u32..8, 0..4)),
        ) {
            let mut animal = subject();
            animal.cameras = subject_has_cameras.then(|| vec![camera(0)]);
            let mut day = session();
            day.device_overrides = Some(DeviceOverrides {
                cameras: override_cameras.clone().map(|ids| {
                    ids.into_iter().map(camera).collect()
                }),
                ..Default::default()
            });

            let record = merge(&animal, &day);
            match override_cameras {
                Some(ids) => {
                    let got = record.cameras.clone().expect("explicit override must be kept");
                    prop_assert_eq!(got.len(), ids.len());
                }
                None => prop_assert_eq!(record.cameras, animal.cameras),
            }
        }

        /// Merge is deterministic over the weight override.
        #[test]
        fn merge_deterministic_under_weight_override(weight in proptest::option::of(1.0f64..2000.0)) {
            let animal = subject();
            let mut day = session();
            day.subject_weight = weight;
            let first = merge(&animal, &day);
            let second = merge(&animal, &day);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.subject.weight, weight.unwrap_or(animal.facts.weight));
        }
    }
}
