//! File Classification
//!
//! Maps a document path to its semantic file type and derived attributes.
//!
//! ## Design Principles
//!
//! - Pure functions of the path string; no filesystem access
//! - Ordered rule tables, first match wins (see `rules`)
//! - Unknown paths classify as `FileType::Unknown`, never an error

mod path;
pub mod rules;

pub use path::{
    PathParts, artifact_category, complexity_from_path, generate_tags, is_helix_file,
    normalize_path, phase_from_path, title_from_path,
};

use serde::Serialize;
use tracing::trace;

use crate::types::{Complexity, FileType};
use rules::CLASSIFICATION_RULES;

/// Everything derivable from a path, as reported by `helixlink classify`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub path: String,
    pub file_type: FileType,
    pub phase: String,
    pub category: String,
    pub complexity: Complexity,
    pub title: String,
    pub tags: Vec<String>,
    pub is_helix: bool,
}

pub struct FileClassifier;

impl FileClassifier {
    /// Detect the file type of `path`
    pub fn detect(path: &str) -> FileType {
        let parts = PathParts::new(path);
        match CLASSIFICATION_RULES.iter().find(|rule| (rule.matches)(&parts)) {
            Some(rule) => {
                trace!(path, rule = rule.name, "Classified {}", rule.file_type);
                rule.file_type
            }
            None => FileType::Unknown,
        }
    }

    /// Full path classification
    pub fn classify(path: &str) -> Classification {
        let path = normalize_path(path);
        let file_type = Self::detect(&path);
        Classification {
            phase: phase_from_path(&path),
            category: artifact_category(&path),
            complexity: complexity_from_path(&path),
            title: title_from_path(&path),
            tags: generate_tags(&path, file_type),
            is_helix: is_helix_file(&path),
            file_type,
            path,
        }
    }
}
