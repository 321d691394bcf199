//! Documents and their metadata block.
//!
//! A `Document` is created by the loader (or directly in tests), classified
//! once on construction and then treated as immutable for the rest of a
//! conversion session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::file_type::{Complexity, FileType};
use crate::classifier::{self, FileClassifier};

// =============================================================================
// Metadata
// =============================================================================

/// Phase entry/exit criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gates {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exit: Vec<String>,
}

/// Structured header block of a document.
///
/// Only `title` and `aliases` drive link resolution; the remaining fields feed
/// navigation and linting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub title: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    // Phase documents
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phase_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_number: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub next_phase: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub previous_phase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gates: Option<Gates>,

    // Artifacts
    #[serde(skip_serializing_if = "String::is_empty")]
    pub artifact_category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phase: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub complexity: String,

    // Features
    #[serde(skip_serializing_if = "String::is_empty")]
    pub feature_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub priority: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workflow_phase: String,
}

impl Metadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Parsed `created` date; `None` when missing or not `YYYY-MM-DD`
    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created.as_deref().and_then(parse_date)
    }

    pub fn updated_date(&self) -> Option<NaiveDate> {
        self.updated.as_deref().and_then(parse_date)
    }
}

/// Accepts plain dates and RFC 3339 timestamps (date part only)
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Path as given by the caller, `/`-separated
    pub path: String,
    pub metadata: Option<Metadata>,
    /// Raw frontmatter block including its `---` delimiters, kept verbatim for write-back
    pub frontmatter: Option<String>,
    /// Document text after the frontmatter block
    pub content: String,
    pub file_type: FileType,
}

impl Document {
    /// Create a document and classify it from its path
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = classifier::normalize_path(&path.into());
        let file_type = FileClassifier::detect(&path);
        Self {
            path,
            metadata: None,
            frontmatter: None,
            content: content.into(),
            file_type,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_frontmatter(mut self, frontmatter: impl Into<String>) -> Self {
        self.frontmatter = Some(frontmatter.into());
        self
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata.is_some()
    }

    /// Metadata title when present and non-empty, otherwise derived from the path
    pub fn title(&self) -> String {
        self.metadata
            .as_ref()
            .map(|m| m.title.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| classifier::title_from_path(&self.path))
    }

    pub fn aliases(&self) -> &[String] {
        self.metadata
            .as_ref()
            .map(|m| m.aliases.as_slice())
            .unwrap_or(&[])
    }

    /// Phase from metadata (`phase`, then `phase_id`), falling back to the path
    pub fn phase(&self) -> String {
        if let Some(meta) = &self.metadata {
            if !meta.phase.is_empty() {
                return meta.phase.to_lowercase();
            }
            if !meta.phase_id.is_empty() {
                return meta.phase_id.to_lowercase();
            }
        }
        classifier::phase_from_path(&self.path)
    }

    pub fn artifact_category(&self) -> String {
        self.metadata
            .as_ref()
            .map(|m| m.artifact_category.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| classifier::artifact_category(&self.path))
    }

    pub fn complexity(&self) -> Complexity {
        self.metadata
            .as_ref()
            .and_then(|m| Complexity::parse(&m.complexity))
            .unwrap_or_else(|| classifier::complexity_from_path(&self.path))
    }

    /// Metadata tags when present, otherwise tags generated from path and type
    pub fn tags(&self) -> Vec<String> {
        match &self.metadata {
            Some(meta) if !meta.tags.is_empty() => meta.tags.clone(),
            _ => classifier::generate_tags(&self.path, self.file_type),
        }
    }

    /// Full text as it would be written back: frontmatter block followed by content
    pub fn render(&self, content: &str) -> String {
        match &self.frontmatter {
            Some(block) => format!("{}{}", block, content),
            None => content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_classified_on_creation() {
        let doc = Document::new("workflows/helix/phases/01-frame/README.md", "body");
        assert_eq!(doc.file_type, FileType::Phase);
        assert_eq!(doc.title(), "Frame Phase");
        assert_eq!(doc.phase(), "frame");
        assert!(!doc.has_metadata());
    }

    #[test]
    fn test_metadata_title_overrides_path() {
        let doc = Document::new("docs/a.md", "")
            .with_metadata(Metadata::titled("Alpha").with_aliases(["A", "First"]));
        assert_eq!(doc.title(), "Alpha");
        assert_eq!(doc.aliases(), &["A".to_string(), "First".to_string()]);
    }

    #[test]
    fn test_empty_metadata_title_falls_back() {
        let doc = Document::new("docs/user-guide.md", "").with_metadata(Metadata::default());
        assert_eq!(doc.title(), "User Guide");
    }

    #[test]
    fn test_metadata_yaml_fields() {
        let yaml = r#"
title: Frame Phase
type: phase
tags: [helix, helix/phase]
created: 2024-01-15
phase_id: frame
phase_number: 1
gates:
  entry: [problem defined]
  exit: [prd approved]
"#;
        let meta: Metadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(meta.doc_type, "phase");
        assert_eq!(meta.phase_number, Some(1));
        assert_eq!(
            meta.created_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert!(meta.updated_date().is_none());
        assert_eq!(meta.gates.unwrap().exit, vec!["prd approved".to_string()]);
    }

    #[test]
    fn test_complexity_prefers_metadata() {
        let mut meta = Metadata::titled("T");
        meta.complexity = "complex".to_string();
        let doc = Document::new("artifacts/x/example.md", "").with_metadata(meta);
        assert_eq!(doc.complexity(), Complexity::Complex);

        let doc = Document::new("artifacts/x/example.md", "");
        assert_eq!(doc.complexity(), Complexity::Simple);
    }

    #[test]
    fn test_render_keeps_frontmatter() {
        let doc = Document::new("a.md", "old").with_frontmatter("---\ntitle: A\n---\n");
        assert_eq!(doc.render("new"), "---\ntitle: A\n---\nnew");
    }

    #[test]
    fn test_parse_date_accepts_timestamp() {
        assert_eq!(
            parse_date("2024-03-01T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert!(parse_date("yesterday").is_none());
    }
}
