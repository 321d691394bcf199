//! Broken wikilink detection against the link index.

use serde::Serialize;
use tracing::debug;

use super::parser::parse_wikilinks;
use crate::index::LinkIndex;

/// A wikilink whose target is neither a known title nor an alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub target: String,
    /// 1-based line of the link in the validated text
    pub line: usize,
    pub original: String,
}

pub struct LinkValidator<'a> {
    index: &'a LinkIndex,
}

impl<'a> LinkValidator<'a> {
    pub fn new(index: &'a LinkIndex) -> Self {
        Self { index }
    }

    /// Targets of all broken wikilinks in `text`, in order, duplicates kept.
    ///
    /// Same-note references with an empty target (`[[#Heading]]`) are never broken.
    pub fn validate_wikilinks(&self, text: &str) -> Vec<String> {
        let broken: Vec<String> = parse_wikilinks(text)
            .into_iter()
            .filter(|link| self.is_broken(&link.target))
            .map(|link| link.target)
            .collect();
        debug!(count = broken.len(), "Validated wikilinks");
        broken
    }

    /// Broken links annotated with their line numbers
    pub fn broken_links_with_lines(&self, text: &str) -> Vec<BrokenLink> {
        text.lines()
            .enumerate()
            .flat_map(|(i, line)| {
                parse_wikilinks(line)
                    .into_iter()
                    .filter(|link| self.is_broken(&link.target))
                    .map(move |link| BrokenLink {
                        target: link.target,
                        line: i + 1,
                        original: link.original,
                    })
            })
            .collect()
    }

    fn is_broken(&self, target: &str) -> bool {
        !target.is_empty() && !self.index.contains_target(target)
    }
}
