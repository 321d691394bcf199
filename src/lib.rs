//! helixlink - Wikilink Conversion and Knowledge-Graph Indexing for HELIX Docs
//!
//! Turns a corpus of plain markdown workflow documents into an internally
//! cross-linked set of documents using `[[wikilink]]` syntax, and renders a
//! navigation hub over the result.
//!
//! ## Core Features
//!
//! - **Classification**: path-based file types, phases, categories and titles
//! - **Link Index**: title, alias and path lookups built once per corpus
//! - **Conversion**: idempotent rewriting of markdown links and workflow references
//! - **Validation**: broken wikilinks plus metadata linting
//! - **Navigation**: hub document and per-phase indexes
//!
//! ## Quick Start
//!
//! ```ignore
//! use helixlink::{LinkConverter, LinkIndex, loader};
//!
//! let docs = loader::load_documents(&paths)?;
//! let index = LinkIndex::build(&docs);
//! let converter = LinkConverter::new(&index);
//! let converted = converter.convert_content(&docs[0].content);
//! ```
//!
//! ## Modules
//!
//! - [`classifier`]: path classification rules
//! - [`index`]: title/alias/path lookup tables
//! - [`links`]: wikilink parsing, conversion and validation
//! - [`navigation`]: navigation hub rendering
//! - [`lint`]: document metadata linting
//! - [`loader`]: frontmatter splitting and file loading
//! - [`config`]: layered configuration

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod index;
pub mod links;
pub mod lint;
pub mod loader;
pub mod navigation;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader};

// Error Types
pub use types::error::{HelixError, Result, ResultExt};

// Documents
pub use types::{Complexity, Document, FileType, Metadata, ParsedLink, Phase};

// =============================================================================
// Engine Re-exports
// =============================================================================

pub use classifier::{Classification, FileClassifier};
pub use index::LinkIndex;
pub use links::{ConversionOptions, ConversionStats, LinkConverter, LinkValidator, parse_wikilinks};
pub use lint::{DocumentLinter, LintIssue, LintSummary, Severity};
pub use navigation::{NavigationGenerator, NavigationHub, TagTree};
