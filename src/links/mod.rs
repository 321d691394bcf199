//! Wikilink handling: parsing, conversion and validation.
//!
//! ## Design Principles
//!
//! - All operations are total functions over strings
//! - The index is borrowed read-only; documents may be converted in any order
//!   once it is built
//! - Output syntax matches the viewer exactly: `[[T]]`, `[[T|A]]`, `[[T#H]]`,
//!   `[[T^B]]`, `![[T]]`

pub mod converter;
pub mod parser;
pub mod validator;

pub use converter::{ConversionOptions, ConversionStats, LinkConverter};
pub use parser::{is_inside_wikilink, is_inside_wikilink_at, parse_link_content, parse_wikilinks};
pub use validator::{BrokenLink, LinkValidator};
