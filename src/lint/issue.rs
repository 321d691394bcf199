use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::HelixError;

/// Issue severity; ordered from most to least severe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Error => "✗",
            Severity::Warning => "⚠",
            Severity::Info => "ℹ",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

impl FromStr for Severity {
    type Err = HelixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            other => Err(HelixError::Config(format!(
                "unknown severity '{}' (expected error, warning or info)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintIssue {
    pub path: String,
    /// Metadata field or `content`
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl LintIssue {
    pub fn new(
        path: impl Into<String>,
        field: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            field: field.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn error(path: &str, field: &str, message: impl Into<String>) -> Self {
        Self::new(path, field, Severity::Error, message)
    }

    pub fn warning(path: &str, field: &str, message: impl Into<String>) -> Self {
        Self::new(path, field, Severity::Warning, message)
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.severity, self.path, self.field, self.message
        )
    }
}

/// Lint results bucketed by severity
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintSummary {
    pub generated_at: DateTime<Utc>,
    pub total_files: usize,
    /// Files actually linted (unclassified files are skipped)
    pub validated_files: usize,
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
    pub info: Vec<LintIssue>,
}

impl LintSummary {
    pub fn new(total_files: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            total_files,
            ..Default::default()
        }
    }

    pub fn add(&mut self, issue: LintIssue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Info => self.info.push(issue),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.info.len()
    }

    /// Issues at `min` severity or more severe, most severe first
    pub fn issues_at_least(&self, min: Severity) -> impl Iterator<Item = &LintIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .chain(&self.info)
            .filter(move |i| i.severity <= min)
    }
}
