//! # recmeta-codec — Channel-Map Text Codec
//!
//! Round-trips ntrode channel maps through a spreadsheet-friendly CSV
//! dialect so wiring can be reviewed and edited outside the authoring tool:
//!
//! ```text
//! electrode_group_id,device_type,location,ntrode_id,electrode_id,bad_channels,channel_0,channel_1,...
//! 0,tetrode_12.5,CA1,1,0,"0,3",32,33,...
//! ```
//!
//! The `bad_channels` cell is always quoted (`""` when empty) and holds a
//! comma-joined integer list; every other cell is bare. `device_type` and
//! `location` are annotations copied from the owning electrode group on
//! encode and ignored on decode.
//!
//! ## Fault model
//!
//! [`decode`] guarantees shape only — it checks the header and cell types
//! and raises a [`CodecError`] naming the offending row and column. The
//! wiring invariants (unique physical channels, contiguous logical range)
//! remain the rules validator's business, so a user can import a flawed
//! map and see the findings in the same batch as everything else. No safe
//! partial result exists for malformed text, hence errors, not issues.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use recmeta_core::{ChannelMap, ElectrodeGroup};

/// Fixed leading columns, in header order, before the channel columns.
const LEADING_COLUMNS: [&str; 6] = [
    "electrode_group_id",
    "device_type",
    "location",
    "ntrode_id",
    "electrode_id",
    "bad_channels",
];

/// Columns decode refuses to proceed without. The annotation columns
/// (`device_type`, `location`) are optional on the way back in.
const REQUIRED_COLUMNS: [&str; 4] = [
    "electrode_group_id",
    "ntrode_id",
    "electrode_id",
    "bad_channels",
];

/// Error decoding channel-map text. Message text is the user-facing
/// contract; callers present it verbatim.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input has no header row.
    #[error("channel-map text is empty")]
    Empty,

    /// The header is missing required columns.
    #[error("channel-map header is missing required column(s): {}", missing.join(", "))]
    MissingColumns {
        /// Every absent required column, in header order.
        missing: Vec<String>,
    },

    /// A data row has fewer cells than the header declares.
    #[error("row {row} has {found} cells, expected {expected}")]
    ShortRow {
        /// 1-based line number, counting the header as line 1.
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell failed to parse as an integer.
    #[error("row {row}, column '{column}': cannot parse '{value}' as an integer")]
    BadCell {
        /// 1-based line number, counting the header as line 1.
        row: usize,
        /// Header name of the offending column.
        column: String,
        /// The raw cell content.
        value: String,
    },
}

/// Encode channel maps as CSV text, annotated with each map's owning
/// electrode group. The channel column count is taken from the first map;
/// an empty input produces just the fixed header.
pub fn encode(maps: &[ChannelMap], groups: &[ElectrodeGroup]) -> String {
    let channel_count = maps.first().map_or(0, |m| m.map.len());

    let mut header: Vec<String> = LEADING_COLUMNS.iter().map(|c| c.to_string()).collect();
    for ch in 0..channel_count {
        header.push(format!("channel_{ch}"));
    }

    let mut out = header.join(",");
    out.push('\n');

    for cm in maps {
        let group = groups.iter().find(|g| g.id == cm.electrode_group_id);
        let bad = cm
            .bad_channels
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut row: Vec<String> = vec![
            cm.electrode_group_id.to_string(),
            group.map_or(String::new(), |g| g.device_type.clone()),
            group.map_or(String::new(), |g| g.location.clone()),
            cm.ntrode_id.to_string(),
            cm.electrode_id.to_string(),
            format!("\"{bad}\""),
        ];
        for ch in 0..channel_count as u32 {
            row.push(cm.map.get(&ch).map(u32::to_string).unwrap_or_default());
        }
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Decode channel-map CSV text.
///
/// Reconstructs each row as a [`ChannelMap`] with `map` keyed by the
/// logical index from the `channel_<i>` header names. Row order is
/// preserved exactly as written.
///
/// # Errors
///
/// [`CodecError::Empty`] for blank input; [`CodecError::MissingColumns`]
/// when any required column (or every channel column) is absent;
/// [`CodecError::ShortRow`]/[`CodecError::BadCell`] with the offending
/// row number and column name for malformed data rows.
pub fn decode(text: &str) -> Result<Vec<ChannelMap>, CodecError> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header_line = lines.next().ok_or(CodecError::Empty)?;
    let header = split_row(header_line);

    let column = |name: &str| header.iter().position(|h| h == name);

    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| column(c).is_none())
        .map(|c| c.to_string())
        .collect();

    // (logical index, column position) for every channel column, in
    // header order.
    let mut channel_columns: Vec<(u32, usize)> = Vec::new();
    for (pos, name) in header.iter().enumerate() {
        if let Some(suffix) = name.strip_prefix("channel_") {
            if let Ok(logical) = suffix.parse::<u32>() {
                channel_columns.push((logical, pos));
            }
        }
    }
    if channel_columns.is_empty() {
        missing.push("channel_0".to_string());
    }
    if !missing.is_empty() {
        return Err(CodecError::MissingColumns { missing });
    }

    let group_col = column("electrode_group_id").unwrap_or_default();
    let ntrode_col = column("ntrode_id").unwrap_or_default();
    let electrode_col = column("electrode_id").unwrap_or_default();
    let bad_col = column("bad_channels").unwrap_or_default();

    let mut maps = Vec::new();
    for (index, line) in lines.enumerate() {
        let row_number = index + 2; // header is line 1
        let cells = split_row(line);
        if cells.len() < header.len() {
            return Err(CodecError::ShortRow {
                row: row_number,
                expected: header.len(),
                found: cells.len(),
            });
        }

        let electrode_group_id = parse_cell(&cells[group_col], row_number, &header[group_col])?;
        let ntrode_id = parse_cell(&cells[ntrode_col], row_number, &header[ntrode_col])?;
        let electrode_id: i32 =
            parse_cell(&cells[electrode_col], row_number, &header[electrode_col])?;
        let bad_channels = parse_bad_channels(&cells[bad_col], row_number)?;

        let mut map = BTreeMap::new();
        for (logical, pos) in &channel_columns {
            let physical = parse_cell(&cells[*pos], row_number, &header[*pos])?;
            map.insert(*logical, physical);
        }

        maps.push(ChannelMap {
            ntrode_id,
            electrode_group_id,
            electrode_id,
            bad_channels,
            map,
        });
    }

    Ok(maps)
}

fn parse_cell<T: std::str::FromStr>(
    cell: &str,
    row: usize,
    column: &str,
) -> Result<T, CodecError> {
    cell.trim().parse().map_err(|_| CodecError::BadCell {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn parse_bad_channels(cell: &str, row: usize) -> Result<BTreeSet<u32>, CodecError> {
    let inner = cell.trim();
    if inner.is_empty() {
        return Ok(BTreeSet::new());
    }
    inner
        .split(',')
        .map(|part| parse_cell(part, row, "bad_channels"))
        .collect()
}

/// Split one CSV row, honoring quoted cells so `"0,3"` stays one cell.
/// Quote characters delimit cells and are not part of the content.
fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.trim_end_matches('\r').chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    cells.push(current);
    cells
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        /// A channel map with 1-64 channels and an arbitrary subset of
        /// logical channels marked bad.
        fn arb_channel_map()(
            ntrode_id in 0u32..128,
            electrode_group_id in 0u32..16,
            electrode_id in 0i32..16,
            physical in proptest::collection::vec(0u32..4096, 1..=64),
            bad_mask in proptest::collection::vec(any::<bool>(), 64),
        ) -> ChannelMap {
            let map: std::collections::BTreeMap<u32, u32> = physical
                .iter()
                .copied()
                .enumerate()
                .map(|(i, p)| (i as u32, p))
                .collect();
            let bad_channels = (0..physical.len() as u32)
                .filter(|ch| bad_mask[*ch as usize])
                .collect();
            ChannelMap { ntrode_id, electrode_group_id, electrode_id, bad_channels, map }
        }
    }

    proptest! {
        /// decode(encode(maps)) reconstructs ids, bad channels, and the
        /// full logical-to-physical map for uniform channel counts.
        #[test]
        fn round_trip(first in arb_channel_map(), rest_count in 0usize..4) {
            // All rows share the first map's channel count; the header is
            // derived from it.
            let width = first.map.len() as u32;
            let mut maps = vec![first.clone()];
            for i in 0..rest_count {
                let mut cm = first.clone();
                cm.ntrode_id = first.ntrode_id + 1 + i as u32;
                cm.map = (0..width).map(|ch| (ch, ch * 2 + i as u32)).collect();
                maps.push(cm);
            }
            let decoded = decode(&encode(&maps, &[])).unwrap();
            prop_assert_eq!(decoded, maps);
        }

        /// Arbitrary junk either decodes cleanly or errors; it never panics.
        #[test]
        fn decode_never_panics(text in "[ -~\n]{0,256}") {
            let _ = decode(&text);
        }
    }
}
