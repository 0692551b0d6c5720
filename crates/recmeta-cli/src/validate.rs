//! # `recmeta validate`
//!
//! Merges a subject and a session and runs the full validation pass.
//! Prints every finding in one batch; exits non-zero when any exists.

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use crate::{input, report};

/// Arguments for `recmeta validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Subject record (YAML).
    #[arg(long)]
    pub subject: PathBuf,
    /// Session record (YAML).
    #[arg(long)]
    pub session: PathBuf,
    /// Schema document (JSON); defaults to the bundled schema.
    #[arg(long)]
    pub schema: Option<PathBuf>,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let subject = input::load_subject(&args.subject)?;
    let session = input::load_session(&args.session)?;
    let schema = input::schema_validator(args.schema.as_deref())?;

    let record = recmeta_merge::merge(&subject, &session);
    tracing::debug!(session_id = %record.session_id, "record merged");

    let outcome = recmeta_validate::validate_all(&schema, &record)?;
    if outcome.is_valid {
        tracing::info!(session_id = %record.session_id, "record is valid");
        println!("ok: {}", record.session_id);
        return Ok(());
    }

    print!("{}", report::render(&outcome));
    bail!("validation failed with {} issue(s)", outcome.issues.len());
}
