//! Parsed wikilink structure and its canonical rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One wikilink as found in (or destined for) document text.
///
/// Rendering via `Display` produces the exact syntax the viewer expects:
/// `[[Target]]`, `[[Target|Alias]]`, `[[Target#Heading]]`, `[[Target^BlockID]]`
/// and `![[Target]]` for embeds. Parsing the rendered text recovers an equal
/// value (ignoring `original`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedLink {
    pub target: String,
    pub alias: Option<String>,
    pub heading: Option<String>,
    pub block_id: Option<String>,
    pub is_embed: bool,
    /// Raw matched substring; empty for synthesized links
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original: String,
}

impl ParsedLink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }

    pub fn with_block_id(mut self, block_id: impl Into<String>) -> Self {
        self.block_id = Some(block_id.into());
        self
    }

    pub fn embed(mut self) -> Self {
        self.is_embed = true;
        self
    }

    /// Link to `title`, aliased with `display` only when the two differ.
    pub fn titled(title: impl Into<String>, display: &str) -> Self {
        let title = title.into();
        let alias = (display != title).then(|| display.to_string());
        Self {
            target: title,
            alias,
            ..Default::default()
        }
    }

    /// Whether the link points below document level
    pub fn has_fragment(&self) -> bool {
        self.heading.is_some() || self.block_id.is_some()
    }

    /// Structural equality, ignoring the raw source text
    pub fn same_link(&self, other: &ParsedLink) -> bool {
        self.target == other.target
            && self.alias == other.alias
            && self.heading == other.heading
            && self.block_id == other.block_id
            && self.is_embed == other.is_embed
    }
}

impl fmt::Display for ParsedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_embed {
            f.write_str("!")?;
        }
        write!(f, "[[{}", self.target)?;
        if let Some(heading) = &self.heading {
            write!(f, "#{}", heading)?;
        }
        if let Some(block_id) = &self.block_id {
            write!(f, "^{}", block_id)?;
        }
        if let Some(alias) = &self.alias {
            write!(f, "|{}", alias)?;
        }
        f.write_str("]]")
    }
}
