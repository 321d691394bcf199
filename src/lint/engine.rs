use tracing::debug;

use super::issue::{LintIssue, LintSummary};
use super::rules::{FeatureRule, LintRule, MetadataRule, PhaseRule, TagRule, WikilinkRule};
use crate::types::{Document, FileType};

/// Runs every registered rule over each classified document
pub struct DocumentLinter {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for DocumentLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLinter {
    /// Linter with the built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(MetadataRule),
                Box::new(TagRule),
                Box::new(WikilinkRule),
                Box::new(PhaseRule),
                Box::new(FeatureRule),
            ],
        }
    }

    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn lint(&self, doc: &Document) -> Vec<LintIssue> {
        self.rules.iter().flat_map(|rule| rule.check(doc)).collect()
    }

    /// Lint all documents; unclassified documents are counted but skipped
    pub fn lint_all(&self, documents: &[Document]) -> LintSummary {
        let mut summary = LintSummary::new(documents.len());

        for doc in documents {
            if doc.file_type == FileType::Unknown {
                continue;
            }
            summary.validated_files += 1;
            for issue in self.lint(doc) {
                summary.add(issue);
            }
        }

        debug!(
            files = summary.validated_files,
            errors = summary.errors.len(),
            warnings = summary.warnings.len(),
            "Linted documents"
        );
        summary
    }
}
