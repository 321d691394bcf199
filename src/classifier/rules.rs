//! Ordered path rule tables.
//!
//! Each table is evaluated top to bottom and the first rule that matches wins.
//! Rules are plain function pointers so the order is visible in one place.

use super::path::{PathParts, category_of, phase_of};
use crate::constants::titles;
use crate::types::FileType;
use crate::types::utils::{capitalize, titleize};

// =============================================================================
// Classification
// =============================================================================

/// Path pattern → file type
pub struct ClassificationRule {
    pub name: &'static str,
    pub file_type: FileType,
    pub matches: fn(&PathParts<'_>) -> bool,
}

pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "phases/<id>/README.md",
        file_type: FileType::Phase,
        matches: |p| p.file_name() == "README.md" && p.ancestor(2) == Some("phases"),
    },
    ClassificationRule {
        name: "phases/<id>/enforcer.md",
        file_type: FileType::Enforcer,
        matches: |p| p.file_name() == "enforcer.md" && p.ancestor(2) == Some("phases"),
    },
    ClassificationRule {
        name: "artifacts/<category>/template.md",
        file_type: FileType::Template,
        matches: |p| p.file_name() == "template.md" && p.ancestor(2) == Some("artifacts"),
    },
    ClassificationRule {
        name: "artifacts/<category>/prompt.md",
        file_type: FileType::Prompt,
        matches: |p| p.file_name() == "prompt.md" && p.ancestor(2) == Some("artifacts"),
    },
    ClassificationRule {
        name: "artifacts/<category>/example.md",
        file_type: FileType::Example,
        matches: |p| p.file_name() == "example.md" && p.ancestor(2) == Some("artifacts"),
    },
    ClassificationRule {
        name: "coordinator.md",
        file_type: FileType::Coordinator,
        matches: |p| p.file_name() == "coordinator.md",
    },
    ClassificationRule {
        name: "principles.md",
        file_type: FileType::Principle,
        matches: |p| p.file_name() == "principles.md",
    },
    ClassificationRule {
        name: "NN-<phase>/**/FEAT-<n>*.md",
        file_type: FileType::Feature,
        matches: |p| p.numbered_phase().is_some() && p.feature_id().is_some(),
    },
];

// =============================================================================
// Title and Resolution
// =============================================================================

/// Path pattern → title extractor
pub struct PathRule {
    pub name: &'static str,
    pub extract: fn(&PathParts<'_>) -> Option<String>,
}

/// Evaluate `rules` in order and return the first extracted title
pub fn first_match(rules: &[PathRule], parts: &PathParts<'_>) -> Option<String> {
    rules.iter().find_map(|rule| (rule.extract)(parts))
}

/// Titles derived for documents without a metadata title
pub const TITLE_RULES: &[PathRule] = &[
    PathRule {
        name: "phase readme",
        extract: phase_readme,
    },
    PathRule {
        name: "artifact readme",
        extract: artifact_readme,
    },
    PathRule {
        name: "enforcer",
        extract: |p| {
            (p.stem() == "enforcer").then(|| match phase_title(p) {
                Some(title) => format!("{} Enforcer", title),
                None => "Phase Enforcer".to_string(),
            })
        },
    },
    PathRule {
        name: "template",
        extract: |p| artifact_file_title(p, "template", "Template"),
    },
    PathRule {
        name: "prompt",
        extract: |p| artifact_file_title(p, "prompt", "Prompt"),
    },
    PathRule {
        name: "example",
        extract: |p| artifact_file_title(p, "example", "Example"),
    },
    PathRule {
        name: "coordinator",
        extract: |p| (p.stem() == "coordinator").then(|| titles::COORDINATOR.to_string()),
    },
    PathRule {
        name: "principles",
        extract: |p| (p.stem() == "principles").then(|| titles::PRINCIPLES.to_string()),
    },
    PathRule {
        name: "feature",
        extract: feature_slug_title,
    },
    PathRule {
        name: "readme",
        extract: |p| (p.stem() == "README").then(|| "README".to_string()),
    },
];

/// Fallback titles for link targets missing from the index
pub const RESOLUTION_RULES: &[PathRule] = &[
    PathRule {
        name: "phase readme",
        extract: phase_readme,
    },
    PathRule {
        name: "artifact readme",
        extract: artifact_readme,
    },
    PathRule {
        name: "enforcer",
        extract: |p| {
            if p.stem() != "enforcer" {
                return None;
            }
            phase_title(p).map(|title| format!("{} Enforcer", title))
        },
    },
    PathRule {
        name: "template",
        extract: |p| artifact_file_resolution(p, "template", "Template"),
    },
    PathRule {
        name: "prompt",
        extract: |p| artifact_file_resolution(p, "prompt", "Prompt"),
    },
    PathRule {
        name: "example",
        extract: |p| artifact_file_resolution(p, "example", "Example"),
    },
    PathRule {
        name: "coordinator",
        extract: |p| {
            p.file_name()
                .contains("coordinator")
                .then(|| titles::COORDINATOR.to_string())
        },
    },
    PathRule {
        name: "principles",
        extract: |p| {
            p.file_name()
                .contains("principle")
                .then(|| titles::PRINCIPLES.to_string())
        },
    },
    PathRule {
        name: "feature id",
        extract: |p| p.feature_id().map(str::to_string),
    },
];

// =============================================================================
// Extractors
// =============================================================================

/// `<Phase> Phase` when the path names a phase
fn phase_title(p: &PathParts<'_>) -> Option<String> {
    let phase = phase_of(p);
    (!phase.is_empty()).then(|| format!("{} Phase", capitalize(&phase)))
}

fn phase_readme(p: &PathParts<'_>) -> Option<String> {
    if p.stem() != "README" {
        return None;
    }
    phase_title(p)
}

fn artifact_readme(p: &PathParts<'_>) -> Option<String> {
    if p.stem() != "README" {
        return None;
    }
    let category = category_of(p);
    (!category.is_empty()).then(|| titleize(&category))
}

/// `<Category> <Kind>`, or the bare kind when no category is present
fn artifact_file_title(p: &PathParts<'_>, stem: &str, kind: &str) -> Option<String> {
    if p.stem() != stem {
        return None;
    }
    Some(artifact_file_resolution(p, stem, kind).unwrap_or_else(|| kind.to_string()))
}

fn artifact_file_resolution(p: &PathParts<'_>, stem: &str, kind: &str) -> Option<String> {
    if p.stem() != stem {
        return None;
    }
    p.segment_after("artifacts")
        .map(|category| format!("{} {}", titleize(category), kind))
}

/// Slug after the feature identifier, e.g. `FEAT-001-user-auth` → `User Auth`
fn feature_slug_title(p: &PathParts<'_>) -> Option<String> {
    let id = p.feature_id()?;
    let stem = p.stem();
    let slug = stem
        .find(id)
        .map(|start| &stem[start + id.len()..])
        .unwrap_or("")
        .trim_matches(|c| c == '-' || c == '_');
    if slug.is_empty() {
        Some(titles::FEATURE_FALLBACK.to_string())
    } else {
        Some(titleize(slug))
    }
}
