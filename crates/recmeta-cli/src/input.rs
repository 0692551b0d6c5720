//! # Input Loading
//!
//! YAML loaders for subject and session records and the schema handle
//! builder. The workspace editor persists records as YAML; this module
//! treats the YAML layer as an external codec and only maps its errors
//! into readable context.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use recmeta_core::{Session, Subject};
use recmeta_schema::SchemaValidator;

/// The schema shipped with the tool, used when `--schema` is not given.
const BUNDLED_SCHEMA: &str = include_str!("../../../schemas/session-metadata.schema.json");

/// Load a subject record from a YAML file.
pub fn load_subject(path: &Path) -> anyhow::Result<Subject> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read subject file '{}'", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("invalid subject record in '{}'", path.display()))
}

/// Load a session record from a YAML file.
pub fn load_session(path: &Path) -> anyhow::Result<Session> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read session file '{}'", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("invalid session record in '{}'", path.display()))
}

/// Build the compiled schema handle: from `--schema` when given, else from
/// the bundled session-metadata schema. A compile failure is fatal here —
/// validating against nothing is worse than refusing to start.
pub fn schema_validator(schema_path: Option<&Path>) -> anyhow::Result<SchemaValidator> {
    match schema_path {
        Some(path) => SchemaValidator::from_file(path)
            .with_context(|| format!("cannot use schema '{}'", path.display())),
        None => {
            let schema: Value =
                serde_json::from_str(BUNDLED_SCHEMA).context("bundled schema is not JSON")?;
            SchemaValidator::new(&schema).context("bundled schema failed to compile")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_schema_compiles() {
        schema_validator(None).unwrap();
    }
}
