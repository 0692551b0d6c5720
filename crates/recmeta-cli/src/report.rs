//! # Issue Reporting
//!
//! Renders a validation outcome for the terminal: one line per issue,
//! grouped by record section, every finding from the pass in one batch.

use recmeta_core::Issue;
use recmeta_validate::ValidationOutcome;

/// Render every issue, grouped by section id, in the outcome's canonical
/// order within each group.
pub fn render(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();
    for section in &outcome.error_ids {
        out.push_str(&section_header(section));
        out.push('\n');
        for issue in outcome.issues.iter().filter(|i| i.group_id() == section) {
            out.push_str(&render_issue(issue));
            out.push('\n');
        }
    }
    out.push_str(&format!(
        "{} issue(s) across {} section(s)\n",
        outcome.issues.len(),
        outcome.error_ids.len()
    ));
    out
}

fn section_header(section: &str) -> String {
    format!("[{section}]")
}

fn render_issue(issue: &Issue) -> String {
    format!("  {} ({}): {}", issue.path, issue.code, issue.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recmeta_core::{codes, Issue};
    use std::collections::BTreeSet;

    #[test]
    fn test_render_groups_by_section() {
        let issues = vec![
            Issue::error("tasks", codes::MISSING_CAMERA, "no cameras"),
            Issue::error("ntrode_1", codes::DUPLICATE_CHANNELS, "channel 5 twice"),
        ];
        let error_ids: BTreeSet<String> =
            issues.iter().map(|i| i.group_id().to_string()).collect();
        let outcome = ValidationOutcome {
            is_valid: false,
            issues,
            error_ids,
        };
        let text = render(&outcome);
        assert!(text.contains("[tasks]"));
        assert!(text.contains("[ntrode_1]"));
        assert!(text.contains("2 issue(s) across 2 section(s)"));
    }
}
