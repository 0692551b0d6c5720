//! # `recmeta export`
//!
//! Merge, validate, and write the flattened record as YAML for the
//! downstream conversion pipeline. Refuses to write while any issue
//! exists — an invalid export is worse than no export.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use crate::{input, report};

/// Arguments for `recmeta export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Subject record (YAML).
    #[arg(long)]
    pub subject: PathBuf,
    /// Session record (YAML).
    #[arg(long)]
    pub session: PathBuf,
    /// Schema document (JSON); defaults to the bundled schema.
    #[arg(long)]
    pub schema: Option<PathBuf>,
    /// Output path for the flattened record (YAML).
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ExportArgs) -> anyhow::Result<()> {
    let subject = input::load_subject(&args.subject)?;
    let session = input::load_session(&args.session)?;
    let schema = input::schema_validator(args.schema.as_deref())?;

    let record = recmeta_merge::merge(&subject, &session);
    let outcome = recmeta_validate::validate_all(&schema, &record)?;
    if !outcome.is_valid {
        print!("{}", report::render(&outcome));
        bail!(
            "refusing to export: {} unresolved issue(s)",
            outcome.issues.len()
        );
    }

    let yaml = serde_yaml::to_string(&record).context("cannot serialize record")?;
    std::fs::write(&args.out, yaml)
        .with_context(|| format!("cannot write '{}'", args.out.display()))?;
    tracing::info!(out = %args.out.display(), session_id = %record.session_id, "record exported");
    println!("exported: {}", args.out.display());
    Ok(())
}
