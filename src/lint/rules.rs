//! Document lint rules.
//!
//! Each rule inspects one document and reports issues as data. Rules that
//! need metadata stay silent when it is missing; `MetadataRule` reports that.

use std::sync::LazyLock;

use regex::Regex;

use super::issue::LintIssue;
use crate::constants::{lint, tags};
use crate::types::utils::compile_regex;
use crate::types::{Document, FileType, Metadata};

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^helix(/[a-z0-9-]+)*$"));

static FEATURE_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^FEAT-\d+$"));

pub trait LintRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, doc: &Document) -> Vec<LintIssue>;
}

// =============================================================================
// Metadata
// =============================================================================

/// Fields a document of each type must carry
const REQUIRED_FIELDS: &[(FileType, &[&str])] = &[
    (
        FileType::Phase,
        &["title", "type", "phase_id", "phase_number", "tags"],
    ),
    (FileType::Enforcer, &["title", "type", "phase", "tags"]),
    (FileType::Feature, &["title", "type", "feature_id", "tags"]),
];

const DEFAULT_REQUIRED_FIELDS: &[&str] = &["title", "type", "tags"];

pub fn required_fields(file_type: FileType) -> &'static [&'static str] {
    REQUIRED_FIELDS
        .iter()
        .find(|(ft, _)| *ft == file_type)
        .map(|(_, fields)| *fields)
        .unwrap_or(DEFAULT_REQUIRED_FIELDS)
}

fn has_field(meta: &Metadata, field: &str) -> bool {
    match field {
        "title" => !meta.title.is_empty(),
        "type" => !meta.doc_type.is_empty(),
        "tags" => !meta.tags.is_empty(),
        "phase_id" => !meta.phase_id.is_empty(),
        "phase_number" => meta.phase_number.is_some_and(|n| n > 0),
        "phase" => !meta.phase.is_empty(),
        "artifact_category" => !meta.artifact_category.is_empty(),
        "feature_id" => !meta.feature_id.is_empty(),
        _ => false,
    }
}

/// Presence of the metadata block, required fields and dates
pub struct MetadataRule;

impl LintRule for MetadataRule {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn check(&self, doc: &Document) -> Vec<LintIssue> {
        let path = doc.path.as_str();
        let Some(meta) = &doc.metadata else {
            return vec![LintIssue::error(path, "frontmatter", "missing frontmatter")];
        };

        let mut issues: Vec<LintIssue> = required_fields(doc.file_type)
            .iter()
            .filter(|field| !has_field(meta, field))
            .map(|field| LintIssue::error(path, field, "required field missing"))
            .collect();

        if meta.title.trim().is_empty() {
            issues.push(LintIssue::error(path, "title", "title cannot be empty"));
        }
        if meta.doc_type.trim().is_empty() {
            issues.push(LintIssue::error(path, "type", "type cannot be empty"));
        }
        if meta.created_date().is_none() {
            issues.push(LintIssue::warning(
                path,
                "created",
                "created date missing or invalid",
            ));
        }
        if meta.updated_date().is_none() {
            issues.push(LintIssue::warning(
                path,
                "updated",
                "updated date missing or invalid",
            ));
        }
        issues
    }
}

// =============================================================================
// Tags
// =============================================================================

pub struct TagRule;

impl TagRule {
    pub fn is_valid_tag(tag: &str) -> bool {
        TAG_RE.is_match(tag) || lint::STANDALONE_TAGS.contains(&tag)
    }
}

impl LintRule for TagRule {
    fn name(&self) -> &'static str {
        "tags"
    }

    fn check(&self, doc: &Document) -> Vec<LintIssue> {
        let path = doc.path.as_str();
        let Some(meta) = &doc.metadata else {
            return Vec::new();
        };
        if meta.tags.is_empty() {
            return vec![LintIssue::warning(path, "tags", "no tags specified")];
        }

        let mut issues: Vec<LintIssue> = meta
            .tags
            .iter()
            .filter(|tag| !Self::is_valid_tag(tag))
            .map(|tag| LintIssue::error(path, "tags", format!("invalid tag format: {}", tag)))
            .collect();

        let rooted = meta
            .tags
            .iter()
            .any(|t| t == tags::ROOT || t.starts_with(&format!("{}/", tags::ROOT)));
        if !rooted {
            issues.push(LintIssue::error(
                path,
                "tags",
                format!("missing required '{}' tag", tags::ROOT),
            ));
        }
        issues
    }
}

// =============================================================================
// Wikilinks
// =============================================================================

/// Raw `[[...]]` bodies, scanning greedily for the next `]]` so that nested
/// or unbalanced openers stay visible.
fn raw_wikilinks(content: &str) -> Vec<&str> {
    let mut links = Vec::new();
    let mut rest = content;
    while let Some(open) = rest.find("[[") {
        let body = &rest[open + 2..];
        let Some(close) = body.find("]]") else {
            break;
        };
        links.push(&body[..close]);
        rest = &body[close + 2..];
    }
    links
}

/// Target part of a raw wikilink body
fn raw_target(body: &str) -> &str {
    let end = body.find(['|', '#', '^']).unwrap_or(body.len());
    body[..end].trim()
}

pub struct WikilinkRule;

impl LintRule for WikilinkRule {
    fn name(&self) -> &'static str {
        "wikilinks"
    }

    fn check(&self, doc: &Document) -> Vec<LintIssue> {
        let path = doc.path.as_str();
        let mut issues = Vec::new();

        for body in raw_wikilinks(&doc.content) {
            if body.trim().is_empty() {
                issues.push(LintIssue::error(path, "content", "empty wikilink found"));
                continue;
            }
            let target = raw_target(body);
            if target.contains("[[") {
                issues.push(LintIssue::error(
                    path,
                    "content",
                    format!("malformed wikilink: {}", target),
                ));
            }
            if target.contains("http://") || target.contains("https://") {
                issues.push(LintIssue::warning(
                    path,
                    "content",
                    format!("wikilink contains URL: {}", target),
                ));
            }
        }
        issues
    }
}

// =============================================================================
// Phase & Feature
// =============================================================================

pub struct PhaseRule;

impl LintRule for PhaseRule {
    fn name(&self) -> &'static str {
        "phase"
    }

    fn check(&self, doc: &Document) -> Vec<LintIssue> {
        let path = doc.path.as_str();
        let Some(meta) = doc.metadata.as_ref().filter(|_| doc.file_type == FileType::Phase) else {
            return Vec::new();
        };
        let mut issues = Vec::new();

        if meta.phase_id.is_empty() {
            issues.push(LintIssue::error(path, "phase_id", "phase ID missing"));
        }
        let number = meta.phase_number.unwrap_or(0);
        if !(1..=i64::from(lint::MAX_PHASE_NUMBER)).contains(&number) {
            issues.push(LintIssue::error(
                path,
                "phase_number",
                format!(
                    "invalid phase number: {} (must be 1-{})",
                    number,
                    lint::MAX_PHASE_NUMBER
                ),
            ));
        }

        match &meta.gates {
            None => issues.push(LintIssue::warning(path, "gates", "gates definition missing")),
            Some(gates) => {
                if gates.entry.is_empty() {
                    issues.push(LintIssue::warning(
                        path,
                        "gates.entry",
                        "entry gates not defined",
                    ));
                }
                if gates.exit.is_empty() {
                    issues.push(LintIssue::warning(path, "gates.exit", "exit gates not defined"));
                }
            }
        }
        issues
    }
}

pub struct FeatureRule;

impl LintRule for FeatureRule {
    fn name(&self) -> &'static str {
        "feature"
    }

    fn check(&self, doc: &Document) -> Vec<LintIssue> {
        let path = doc.path.as_str();
        let Some(meta) = doc
            .metadata
            .as_ref()
            .filter(|_| doc.file_type == FileType::Feature)
        else {
            return Vec::new();
        };
        let mut issues = Vec::new();

        if meta.feature_id.is_empty() {
            issues.push(LintIssue::error(path, "feature_id", "feature ID missing"));
        } else if !FEATURE_ID_RE.is_match(&meta.feature_id) {
            issues.push(LintIssue::error(
                path,
                "feature_id",
                format!(
                    "invalid feature ID format: {} (expected FEAT-XXX)",
                    meta.feature_id
                ),
            ));
        }

        if !meta.priority.is_empty() && !lint::PRIORITIES.contains(&meta.priority.as_str()) {
            issues.push(LintIssue::error(
                path,
                "priority",
                format!("invalid priority: {} (expected P0-P3)", meta.priority),
            ));
        }

        if !meta.status.is_empty() && !lint::FEATURE_STATUSES.contains(&meta.status.as_str()) {
            issues.push(LintIssue::warning(
                path,
                "status",
                format!("invalid status: {}", meta.status),
            ));
        }
        issues
    }
}
