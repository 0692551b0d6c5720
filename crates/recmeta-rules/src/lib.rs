//! # recmeta-rules — Semantic Validation
//!
//! Domain invariants that a declarative schema cannot express, computed as
//! a pure function over the flattened record:
//!
//! - **missing_camera** — a task (`tasks`) or a video file
//!   (`associated_video_files`) references a camera id while no cameras
//!   resolve in the record.
//! - **partial_configuration** — the optogenetics field group
//!   (`opto_excitation_source`, `optical_fiber`, `virus_injection`) is
//!   all-or-nothing; one or two configured fields is a finding.
//! - **duplicate_channels** — a channel map wires the same physical
//!   channel to more than one logical channel.
//! - **missing_channels** — a channel map's logical channels are not the
//!   contiguous range `[0..max]`.
//!
//! ## Contract
//!
//! [`validate`] is pure and total: it never panics, performs no I/O, and
//! evaluates every rule on every call — no short-circuiting, so a consumer
//! always sees every category of problem in one pass. Output order is
//! fixed: camera rules first (tasks, then video files), the optogenetics
//! group, then duplicate-channel findings for each map in record order,
//! then missing-channel findings likewise. An absent `map` simply yields
//! no channel findings for that entry; absence degrades to "not
//! configured", never to an error thrown at the caller.

use recmeta_core::{codes, FlattenedRecord, Issue};

/// Marker used in `partial_configuration` messages for a configured field.
const PRESENT: &str = "present";
/// Marker used in `partial_configuration` messages for an unconfigured field.
const ABSENT: &str = "missing";

/// Evaluate every semantic rule against a flattened record.
pub fn validate(record: &FlattenedRecord) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_task_cameras(record, &mut issues);
    check_video_cameras(record, &mut issues);
    check_optogenetics_group(record, &mut issues);
    check_duplicate_channels(record, &mut issues);
    check_missing_channels(record, &mut issues);
    issues
}

fn cameras_resolved(record: &FlattenedRecord) -> bool {
    record.cameras.as_ref().is_some_and(|c| !c.is_empty())
}

/// Tasks referencing a camera require resolved cameras.
fn check_task_cameras(record: &FlattenedRecord, issues: &mut Vec<Issue>) {
    if cameras_resolved(record) {
        return;
    }
    if record.tasks.iter().any(|t| !t.camera_id.is_empty()) {
        issues.push(Issue::error(
            "tasks",
            codes::MISSING_CAMERA,
            "tasks reference camera ids but no cameras are defined",
        ));
    }
}

/// Video files referencing a camera require resolved cameras.
fn check_video_cameras(record: &FlattenedRecord, issues: &mut Vec<Issue>) {
    if cameras_resolved(record) {
        return;
    }
    if record
        .associated_video_files
        .iter()
        .any(|v| !v.camera_id.is_empty())
    {
        issues.push(Issue::error(
            "associated_video_files",
            codes::MISSING_CAMERA,
            "video files reference camera ids but no cameras are defined",
        ));
    }
}

/// The optogenetics field group is all-or-nothing. A field counts as
/// configured only when it is present *and* non-empty.
fn check_optogenetics_group(record: &FlattenedRecord, issues: &mut Vec<Issue>) {
    let fields = [
        ("opto_excitation_source", &record.opto_excitation_source),
        ("optical_fiber", &record.optical_fiber),
        ("virus_injection", &record.virus_injection),
    ];
    let configured = fields
        .iter()
        .filter(|(_, v)| v.as_ref().is_some_and(|entries| !entries.is_empty()))
        .count();
    if configured == 0 || configured == fields.len() {
        return;
    }

    let detail = fields
        .iter()
        .map(|(name, v)| {
            let marker = if v.as_ref().is_some_and(|entries| !entries.is_empty()) {
                PRESENT
            } else {
                ABSENT
            };
            format!("{name}: {marker}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    issues.push(Issue::error(
        "optogenetics",
        codes::PARTIAL_CONFIGURATION,
        format!("optogenetics fields must be configured together or not at all ({detail})"),
    ));
}

/// One finding per channel map with a repeated physical value.
fn check_duplicate_channels(record: &FlattenedRecord, issues: &mut Vec<Issue>) {
    for cm in &record.ntrode_electrode_group_channel_map {
        let duplicates = cm.duplicate_physical_channels();
        if duplicates.is_empty() {
            continue;
        }
        let listed = duplicates
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(Issue::error(
            format!("ntrode_{}", cm.ntrode_id),
            codes::DUPLICATE_CHANNELS,
            format!(
                "ntrode {} wires a physical channel more than once: {listed}",
                cm.ntrode_id
            ),
        ));
    }
}

/// One finding per channel map whose logical channels have gaps.
fn check_missing_channels(record: &FlattenedRecord, issues: &mut Vec<Issue>) {
    for cm in &record.ntrode_electrode_group_channel_map {
        let missing = cm.missing_logical_channels();
        if missing.is_empty() {
            continue;
        }
        let listed = missing
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        issues.push(Issue::error(
            format!("ntrode_{}", cm.ntrode_id),
            codes::MISSING_CHANNELS,
            format!("ntrode {} is missing logical channels: {listed}", cm.ntrode_id),
        ));
    }
}
