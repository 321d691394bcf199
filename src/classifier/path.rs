//! Pure path-string derivations: phase, artifact category, title, complexity, tags.
//!
//! Every function here accepts a `/`- or `\`-separated path and never touches
//! the filesystem.

use regex::Regex;
use std::sync::LazyLock;

use super::rules::{self, TITLE_RULES};
use crate::constants::{tags, titles};
use crate::types::utils::{compile_regex, titleize};
use crate::types::{Complexity, FileType, Phase};

static NUMBERED_SEGMENT_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"^(\d+)-(.+)$"));
static FEATURE_ID_RE: LazyLock<Regex> = LazyLock::new(|| compile_regex(r"FEAT-\d+"));

// =============================================================================
// Path Parts
// =============================================================================

/// Split view over a normalized path
#[derive(Debug, Clone)]
pub struct PathParts<'a> {
    pub segments: Vec<&'a str>,
}

impl<'a> PathParts<'a> {
    pub fn new(path: &'a str) -> Self {
        let segments = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        Self { segments }
    }

    pub fn file_name(&self) -> &'a str {
        self.segments.last().copied().unwrap_or("")
    }

    /// File name without a trailing `.md`
    pub fn stem(&self) -> &'a str {
        let name = self.file_name();
        name.strip_suffix(".md").unwrap_or(name)
    }

    /// Segment `levels` directories above the file (1 = parent directory)
    pub fn ancestor(&self, levels: usize) -> Option<&'a str> {
        self.segments
            .len()
            .checked_sub(levels + 1)
            .and_then(|i| self.segments.get(i).copied())
    }

    pub fn has_segment(&self, name: &str) -> bool {
        self.dirs().iter().any(|s| *s == name)
    }

    /// Directory segment following the first `name` directory
    pub fn segment_after(&self, name: &str) -> Option<&'a str> {
        let dirs = self.dirs();
        dirs.iter()
            .position(|s| *s == name)
            .and_then(|i| dirs.get(i + 1).copied())
    }

    /// All segments except the file name
    pub fn dirs(&self) -> &[&'a str] {
        match self.segments.split_last() {
            Some((_, dirs)) => dirs,
            None => &[],
        }
    }

    /// First `NN-<phase>` directory naming a known phase
    pub fn numbered_phase(&self) -> Option<Phase> {
        self.dirs().iter().find_map(|seg| {
            NUMBERED_SEGMENT_RE
                .captures(seg)
                .and_then(|caps| caps.get(2))
                .and_then(|name| Phase::from_id(&name.as_str().to_lowercase()))
        })
    }

    /// Feature identifier (`FEAT-<digits>`) in the file name
    pub fn feature_id(&self) -> Option<&'a str> {
        FEATURE_ID_RE.find(self.file_name()).map(|m| m.as_str())
    }

    /// Under a documentation tree: a `docs` directory or a numbered phase directory
    pub fn in_docs_tree(&self) -> bool {
        self.has_segment("docs") || self.numbered_phase().is_some()
    }
}

/// Convert separators to `/` and drop leading `./`
pub fn normalize_path(path: &str) -> String {
    let mut path = path.trim().replace('\\', "/");
    while let Some(rest) = path.strip_prefix("./") {
        path = rest.to_string();
    }
    path
}

// =============================================================================
// Derivations
// =============================================================================

/// Phase named by a `phases/<id>` directory (numeric prefix stripped) or by a
/// `NN-<phase>` directory. Empty when absent.
pub fn phase_from_path(path: &str) -> String {
    let parts = PathParts::new(path);
    phase_of(&parts)
}

pub(crate) fn phase_of(parts: &PathParts<'_>) -> String {
    if let Some(token) = parts.segment_after("phases") {
        return strip_numeric_prefix(token).to_lowercase();
    }
    parts
        .numbered_phase()
        .map(|p| p.id().to_string())
        .unwrap_or_default()
}

fn strip_numeric_prefix(segment: &str) -> &str {
    NUMBERED_SEGMENT_RE
        .captures(segment)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or(segment)
}

/// Directory following `artifacts/`; a fixed category for feature files in a
/// documentation tree; otherwise empty.
pub fn artifact_category(path: &str) -> String {
    let parts = PathParts::new(path);
    category_of(&parts)
}

pub(crate) fn category_of(parts: &PathParts<'_>) -> String {
    if let Some(category) = parts.segment_after("artifacts") {
        return category.to_string();
    }
    if parts.feature_id().is_some() && parts.in_docs_tree() {
        return titles::FEATURE_CATEGORY.to_string();
    }
    String::new()
}

/// Display title derived from the path alone
pub fn title_from_path(path: &str) -> String {
    let parts = PathParts::new(path);
    rules::first_match(TITLE_RULES, &parts).unwrap_or_else(|| titleize(parts.stem()))
}

/// Keyword heuristic: `example`/`simple` → simple, `advanced`/`complex` → complex
pub fn complexity_from_path(path: &str) -> Complexity {
    let lower = path.to_lowercase();
    if lower.contains("example") || lower.contains("simple") {
        Complexity::Simple
    } else if lower.contains("advanced") || lower.contains("complex") {
        Complexity::Complex
    } else {
        Complexity::Moderate
    }
}

/// Hierarchical tags for the type plus phase and category tags from the path.
pub fn generate_tags(path: &str, file_type: FileType) -> Vec<String> {
    let parts = PathParts::new(path);
    let mut result: Vec<String> = file_type
        .hierarchical_tags()
        .iter()
        .map(|t| t.to_string())
        .collect();

    let phase = phase_of(&parts);
    if !phase.is_empty() {
        push_unique(&mut result, format!("{}/{}", tags::PHASE_PREFIX, phase));
    }

    let category = category_of(&parts);
    if !category.is_empty() {
        push_unique(
            &mut result,
            format!("{}/{}", tags::ARTIFACT_PREFIX, category.replace('-', "/")),
        );
    }

    result
}

fn push_unique(tags: &mut Vec<String>, tag: String) {
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Whether the path belongs to a workflow tree: a `helix` directory, or a
/// `docs` tree containing a numbered phase directory.
pub fn is_helix_file(path: &str) -> bool {
    let normalized = normalize_path(path);
    let parts = PathParts::new(&normalized);
    parts.has_segment("helix") || (parts.has_segment("docs") && parts.numbered_phase().is_some())
}
