//! Validate Command
//!
//! Lints document metadata and reports wikilinks whose targets are unknown.

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::CommandContext;
use crate::lint::{BrokenLinkReport, DocumentLinter, Reporter, Severity, ValidationReport};
use crate::links::LinkValidator;
use crate::types::{HelixError, Result};

/// Lint and link-check the corpus
pub fn validate(ctx: &CommandContext) -> ValidationReport {
    let index = ctx.index();
    let validator = LinkValidator::new(&index);

    let broken_links = ctx
        .documents
        .iter()
        .filter_map(|doc| {
            let links = validator.broken_links_with_lines(&doc.content);
            (!links.is_empty()).then(|| BrokenLinkReport {
                path: doc.path.clone(),
                links,
            })
        })
        .collect();

    ValidationReport {
        lint: DocumentLinter::new().lint_all(&ctx.documents),
        broken_links,
    }
}

pub fn run(
    ctx: &CommandContext,
    report_path: Option<&Path>,
    severity: Option<&str>,
    output: &Output,
) -> Result<()> {
    let min_severity: Severity = match severity {
        Some(level) => level.parse()?,
        None => ctx.config.validation.min_severity()?,
    };

    let report = validate(ctx);
    Reporter::print_summary(&report, min_severity);

    if let Some(path) = report_path {
        Reporter::generate_json(&report, path)?;
        output.success(&format!("Report saved to: {}", path.display()));
    }

    if report.lint.has_errors() {
        return Err(HelixError::Lint(format!(
            "{} error(s) in {} file(s)",
            report.lint.errors.len(),
            report.lint.validated_files
        )));
    }

    let broken = report.broken_link_count();
    if broken > 0 && ctx.config.validation.fail_on_broken_links {
        return Err(HelixError::BrokenLinks { count: broken });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const FRAME: &str = "---
title: Frame Phase
type: phase
phase_id: frame
phase_number: 1
tags: [helix, helix/phase]
created: 2024-01-01
updated: 2024-01-02
gates:
  entry: [Problem identified]
  exit: [Requirements approved]
---
See [[Design Phase]].
";

    fn context(dir: &TempDir, design: &str) -> CommandContext {
        let phases = dir.path().join("helix/phases");
        fs::create_dir_all(phases.join("01-frame")).unwrap();
        fs::write(phases.join("01-frame/README.md"), FRAME).unwrap();
        let design_path = phases.join("02-design/README.md");
        fs::create_dir_all(design_path.parent().unwrap()).unwrap();
        fs::write(&design_path, design).unwrap();
        let patterns = vec![format!("{}/helix/phases/*/README.md", dir.path().display())];
        CommandContext::load(None, &patterns).unwrap()
    }

    #[test]
    fn test_broken_links_reported_with_lines() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, &FRAME.replace("Frame Phase", "Design Phase").replace(
            "See [[Design Phase]].",
            "Back to [[Frame Phase]]\nand [[Gone Phase]].",
        ));

        let report = validate(&ctx);
        assert_eq!(report.broken_link_count(), 1);
        assert_eq!(report.broken_links[0].links[0].target, "Gone Phase");
        assert_eq!(report.broken_links[0].links[0].line, 2);
    }

    #[test]
    fn test_run_fails_on_lint_errors() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "no frontmatter\n");
        let err = run(&ctx, None, None, &Output::quiet(true)).unwrap_err();
        assert!(matches!(err, HelixError::Lint(_)));
    }

    #[test]
    fn test_run_writes_json_report() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "no frontmatter\n");
        let report = dir.path().join("report.json");
        let _ = run(&ctx, Some(&report), Some("info"), &Output::quiet(true));
        let json = fs::read_to_string(report).unwrap();
        assert!(json.contains("missing frontmatter"));
    }

    #[test]
    fn test_invalid_severity_argument() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, "x");
        assert!(run(&ctx, None, Some("loud"), &Output::quiet(true)).is_err());
    }
}
