//! Document Linting
//!
//! Structural checks over loaded documents: metadata completeness, tag
//! taxonomy, wikilink syntax, phase and feature fields.
//!
//! ## Design Principles
//!
//! - Findings are data (`LintIssue`), never errors
//! - Rules are independent; the engine only aggregates
//! - Unclassified documents are outside the workflow and are skipped

pub mod engine;
pub mod issue;
pub mod reporter;
pub mod rules;

pub use engine::DocumentLinter;
pub use issue::{LintIssue, LintSummary, Severity};
pub use reporter::{BrokenLinkReport, Reporter, ValidationReport};
pub use rules::LintRule;
