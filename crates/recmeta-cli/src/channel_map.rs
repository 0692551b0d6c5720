//! # `recmeta channel-map`
//!
//! Round-trips channel maps through the CSV dialect: `export` writes one
//! configuration version of a subject for spreadsheet review, `import`
//! parses edited text back and reports wiring findings before anyone
//! commits the result to a new configuration version.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Subcommand};

use recmeta_core::FlattenedRecord;
use recmeta_merge::resolve_configuration_version;

use crate::input;

/// Arguments for `recmeta channel-map`.
#[derive(Args, Debug)]
pub struct ChannelMapArgs {
    #[command(subcommand)]
    pub command: ChannelMapCommand,
}

#[derive(Subcommand, Debug)]
pub enum ChannelMapCommand {
    /// Write one configuration version's channel maps as CSV.
    Export {
        /// Subject record (YAML).
        #[arg(long)]
        subject: PathBuf,
        /// Configuration version to export; defaults to the latest.
        #[arg(long)]
        version: Option<u32>,
        /// Output path for the CSV text.
        #[arg(long)]
        out: PathBuf,
    },
    /// Parse channel-map CSV and report wiring findings.
    Import {
        /// CSV file to parse.
        path: PathBuf,
    },
}

pub fn run(args: &ChannelMapArgs) -> anyhow::Result<()> {
    match &args.command {
        ChannelMapCommand::Export {
            subject,
            version,
            out,
        } => export(subject, *version, out),
        ChannelMapCommand::Import { path } => import(path),
    }
}

fn export(subject_path: &PathBuf, version: Option<u32>, out: &PathBuf) -> anyhow::Result<()> {
    let subject = input::load_subject(subject_path)?;
    let Some(config) = resolve_configuration_version(&subject.configuration_history, version)
    else {
        bail!(
            "subject '{}' has no configuration history",
            subject.facts.subject_id
        );
    };

    let text = recmeta_codec::encode(&config.channel_map, &config.electrode_groups);
    std::fs::write(out, text).with_context(|| format!("cannot write '{}'", out.display()))?;
    tracing::info!(
        version = config.version,
        ntrodes = config.channel_map.len(),
        "channel maps exported"
    );
    println!(
        "exported version {} ({} ntrodes): {}",
        config.version,
        config.channel_map.len(),
        out.display()
    );
    Ok(())
}

fn import(path: &PathBuf) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    // Decode errors carry the row/column; surface the message verbatim.
    let maps = recmeta_codec::decode(&text)?;

    // Shape is fine; now check the wiring invariants on the decoded maps.
    let record = FlattenedRecord {
        ntrode_electrode_group_channel_map: maps,
        ..Default::default()
    };
    let findings = recmeta_rules::validate(&record);
    let count = record.ntrode_electrode_group_channel_map.len();
    if findings.is_empty() {
        println!("ok: {count} ntrode(s), no wiring findings");
        return Ok(());
    }

    for issue in &findings {
        println!("  {} ({}): {}", issue.path, issue.code, issue.message);
    }
    bail!("{} wiring finding(s) in {count} ntrode(s)", findings.len());
}
