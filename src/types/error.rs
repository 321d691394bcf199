//! Unified Error Type System
//!
//! Centralized error types for the whole crate.
//!
//! ## Design Principles
//!
//! - Single unified error type (HelixError) for every fallible operation
//! - The conversion core (classification, indexing, conversion, parsing,
//!   validation, navigation) is total and never produces a `HelixError`;
//!   unresolved references and broken links are reported as data
//! - Only I/O-facing layers (loader, config, CLI) return `Result`
//! - No panic/unwrap - all errors are recoverable

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum HelixError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // -------------------------------------------------------------------------
    // Loading Errors
    // -------------------------------------------------------------------------
    #[error("Invalid frontmatter in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    #[error("Failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Unknown phase '{0}' (expected one of: frame, design, test, build, deploy, iterate)")]
    InvalidPhase(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Lint failed: {0}")]
    Lint(String),

    #[error("{count} broken wikilink(s) found")]
    BrokenLinks { count: usize },

    #[error("{count} file(s) would change")]
    WouldChange { count: usize },

    #[error("{0}")]
    Context(String),
}

pub type Result<T> = std::result::Result<T, HelixError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl HelixError {
    /// Create a frontmatter error for a document path
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a load error for a document path
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error describes content findings rather than a failure to run
    pub fn is_finding(&self) -> bool {
        matches!(
            self,
            Self::Lint(_) | Self::BrokenLinks { .. } | Self::WouldChange { .. }
        )
    }
}

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| HelixError::Context(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| HelixError::Context(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HelixError::InvalidPhase("review".to_string());
        assert!(err.to_string().starts_with("Unknown phase 'review'"));

        let err = HelixError::frontmatter("docs/a.md", "bad indentation");
        assert_eq!(
            err.to_string(),
            "Invalid frontmatter in docs/a.md: bad indentation"
        );

        let err = HelixError::BrokenLinks { count: 3 };
        assert_eq!(err.to_string(), "3 broken wikilink(s) found");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HelixError = io.into();
        assert!(matches!(err, HelixError::Io(_)));
        assert!(!err.is_finding());
    }

    #[test]
    fn test_findings() {
        assert!(HelixError::Lint("x".into()).is_finding());
        assert!(HelixError::WouldChange { count: 1 }.is_finding());
        assert!(!HelixError::Config("x".into()).is_finding());
    }

    #[test]
    fn test_with_context() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.with_context("writing hub").unwrap_err();
        assert_eq!(err.to_string(), "writing hub: denied");
    }
}
