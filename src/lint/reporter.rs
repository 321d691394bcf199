use std::fs;
use std::path::Path;

use console::style;
use serde::Serialize;

use super::issue::{LintIssue, LintSummary, Severity};
use crate::links::BrokenLink;
use crate::types::{Result, ResultExt};

/// Broken links of one document
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLinkReport {
    pub path: String,
    pub links: Vec<BrokenLink>,
}

/// Everything `helixlink validate` reports
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub lint: LintSummary,
    pub broken_links: Vec<BrokenLinkReport>,
}

impl ValidationReport {
    pub fn broken_link_count(&self) -> usize {
        self.broken_links.iter().map(|r| r.links.len()).sum()
    }
}

pub struct Reporter;

impl Reporter {
    pub fn generate_json<P: AsRef<Path>>(report: &ValidationReport, output_path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(report)
            .with_context("Failed to serialize validation report")?;
        fs::write(output_path, json)?;
        Ok(())
    }

    pub fn print_summary(report: &ValidationReport, min_severity: Severity) {
        let lint = &report.lint;
        println!("{}", style("Validation Report").bold());
        println!("══════════════════════════════════════");
        println!();
        println!(
            "Files: {} ({} classified)",
            lint.total_files, lint.validated_files
        );
        println!("  Errors: {} {}", lint.errors.len(), style("✗").red());
        println!("  Warnings: {} {}", lint.warnings.len(), style("⚠").yellow());
        println!("  Info: {} {}", lint.info.len(), style("ℹ").blue());
        println!("  Broken links: {}", report.broken_link_count());
        println!();

        Self::print_issues(lint, min_severity);
        Self::print_broken_links(&report.broken_links);

        println!("══════════════════════════════════════");

        let broken = report.broken_link_count();
        if lint.has_errors() || broken > 0 {
            println!(
                "Result: {} ({} errors, {} broken links)",
                style("FAILED").red().bold(),
                lint.errors.len(),
                broken
            );
        } else if lint.has_warnings() {
            println!(
                "Result: {} with warnings ({})",
                style("PASSED").green(),
                lint.warnings.len()
            );
        } else {
            println!("Result: {} ✓", style("PASSED").green().bold());
        }
    }

    fn print_issues(lint: &LintSummary, min_severity: Severity) {
        let filtered: Vec<&LintIssue> = lint.issues_at_least(min_severity).collect();
        if filtered.is_empty() {
            println!("No issues at severity {} or higher.", min_severity);
            println!();
            return;
        }

        println!("Issues ({}):", filtered.len());
        println!();
        for issue in filtered {
            let icon = match issue.severity {
                Severity::Error => style(issue.severity.icon()).red(),
                Severity::Warning => style(issue.severity.icon()).yellow(),
                Severity::Info => style(issue.severity.icon()).blue(),
            };
            println!(
                "{} [{}] {}: {} - {}",
                icon,
                issue.severity,
                style(&issue.path).dim(),
                issue.field,
                issue.message
            );
        }
        println!();
    }

    fn print_broken_links(reports: &[BrokenLinkReport]) {
        if reports.is_empty() {
            return;
        }
        println!("Broken links:");
        println!();
        for report in reports {
            println!("{}", style(&report.path).bold());
            for link in &report.links {
                println!(
                    "  {} line {}: {}",
                    style("✗").red(),
                    link.line,
                    link.original
                );
            }
        }
        println!();
    }
}
