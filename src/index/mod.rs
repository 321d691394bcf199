//! Link Index
//!
//! Lookup tables built once per session from the whole corpus and then
//! shared read-only by the converter and validator.
//!
//! ## Design Principles
//!
//! - Explicit value object passed to consumers; no global state
//! - `BTreeMap` storage so every scan runs in lexicographic path order
//! - Title and alias collisions: last registration wins (logged at debug)
//!
//! ## Path Resolution Tiers
//!
//! A link path is reduced to its significant part (leading `./` and `../`
//! dropped) and matched against indexed paths:
//!
//! 1. exact path
//! 2. segment-aligned suffix (`a/b/c.md` for `b/c.md`)
//! 3. raw suffix
//! 4. substring
//!
//! The first non-empty tier wins; within a tier the lexicographically
//! smallest path is chosen. Bare filenames are shared by many documents
//! (`README`, `template`), so they only serve [`LinkIndex::resolve_name`].

use std::collections::BTreeMap;
use tracing::debug;

use crate::classifier::normalize_path;
use crate::types::Document;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkIndex {
    /// path → title
    paths: BTreeMap<String, String>,
    /// title → path
    titles: BTreeMap<String, String>,
    /// alias → title
    aliases: BTreeMap<String, String>,
    /// bare filename without extension → title
    stems: BTreeMap<String, String>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from documents in input order.
    pub fn build<'a>(documents: impl IntoIterator<Item = &'a Document>) -> Self {
        let mut index = Self::new();
        for doc in documents {
            index.insert(doc);
        }
        debug!(
            paths = index.paths.len(),
            titles = index.titles.len(),
            aliases = index.aliases.len(),
            "Built link index"
        );
        index
    }

    /// Register one document: always a path entry, then its title, aliases and stem.
    pub fn insert(&mut self, doc: &Document) {
        let title = doc.title();

        self.paths.insert(doc.path.clone(), title.clone());

        if let Some(previous) = self.titles.insert(title.clone(), doc.path.clone())
            && previous != doc.path
        {
            debug!(
                title = %title,
                previous = %previous,
                current = %doc.path,
                "Title collision, keeping last registration"
            );
        }

        for alias in doc.aliases() {
            if let Some(previous) = self.aliases.insert(alias.clone(), title.clone())
                && previous != title
            {
                debug!(
                    alias = %alias,
                    previous = %previous,
                    current = %title,
                    "Alias collision, keeping last registration"
                );
            }
        }

        let stem = file_stem(&doc.path);
        if !stem.is_empty() {
            self.stems.insert(stem.to_string(), title);
        }
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Title of the document at exactly `path`
    pub fn title_for_path(&self, path: &str) -> Option<&str> {
        self.paths.get(path).map(String::as_str)
    }

    /// Path of the document registered under `title`
    pub fn path_for_title(&self, title: &str) -> Option<&str> {
        self.titles.get(title).map(String::as_str)
    }

    /// Canonical title an alias points to
    pub fn title_for_alias(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.titles.contains_key(title)
    }

    pub fn has_alias(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    /// Whether a wikilink target names a known title or alias
    pub fn contains_target(&self, target: &str) -> bool {
        self.has_title(target) || self.has_alias(target)
    }

    /// Canonical title for a title, alias or bare filename
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        if let Some((title, _)) = self.titles.get_key_value(name) {
            return Some(title.as_str());
        }
        self.title_for_alias(name)
            .or_else(|| self.stems.get(name).map(String::as_str))
    }

    /// Resolve a link path to a title using the tiers described at module level.
    pub fn resolve_path(&self, link_path: &str) -> Option<&str> {
        let rel = significant_path(link_path);
        if rel.is_empty() {
            return None;
        }

        if let Some(title) = self.title_for_path(&rel) {
            return Some(title);
        }

        let aligned = format!("/{}", rel);
        let tiers: [&dyn Fn(&str) -> bool; 3] = [
            &|path: &str| path.ends_with(&aligned),
            &|path: &str| path.ends_with(&rel),
            &|path: &str| path.contains(&rel),
        ];
        for tier in tiers {
            if let Some((_, title)) = self.paths.iter().find(|(path, _)| tier(path.as_str())) {
                return Some(title.as_str());
            }
        }

        None
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles.keys().map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &str)> {
        self.paths.iter().map(|(p, t)| (p.as_str(), t.as_str()))
    }
}

/// Drop leading `./`, `../` and `/` so relative links can match indexed paths
fn significant_path(link_path: &str) -> String {
    let normalized = normalize_path(link_path);
    let mut rest = normalized.as_str();
    loop {
        if let Some(r) = rest.strip_prefix("../") {
            rest = r;
        } else if let Some(r) = rest.strip_prefix("./") {
            rest = r;
        } else if let Some(r) = rest.strip_prefix('/') {
            rest = r;
        } else {
            break;
        }
    }
    rest.to_string()
}

fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Metadata;

    fn doc(path: &str, title: &str) -> Document {
        Document::new(path, "").with_metadata(Metadata::titled(title))
    }

    fn sample_index() -> LinkIndex {
        let docs = vec![
            doc("workflows/helix/phases/02-design/README.md", "Design Phase"),
            doc(
                "workflows/helix/phases/01-frame/artifacts/feature-specification/template.md",
                "Feature Specification Template",
            ),
            Document::new("a/b/c.md", "").with_metadata(
                Metadata::titled("Widget").with_aliases(["Gadget", "Thing"]),
            ),
        ];
        LinkIndex::build(&docs)
    }

    #[test]
    fn test_every_document_has_path_entry() {
        let docs = vec![Document::new("x/no-meta.md", ""), doc("y.md", "Y")];
        let index = LinkIndex::build(&docs);
        assert_eq!(index.len(), 2);
        assert_eq!(index.title_for_path("x/no-meta.md"), Some("No Meta"));
        assert_eq!(index.title_for_path("y.md"), Some("Y"));
    }

    #[test]
    fn test_titles_and_aliases() {
        let index = sample_index();
        assert!(index.has_title("Widget"));
        assert!(index.has_alias("Gadget"));
        assert!(index.contains_target("Thing"));
        assert!(!index.contains_target("Nonexistent Phase"));
        assert_eq!(index.title_for_alias("Gadget"), Some("Widget"));
        assert_eq!(index.path_for_title("Widget"), Some("a/b/c.md"));
    }

    #[test]
    fn test_resolve_relative_paths() {
        let index = sample_index();
        assert_eq!(index.resolve_path("../c.md"), Some("Widget"));
        assert_eq!(index.resolve_path("./b/c.md"), Some("Widget"));
        assert_eq!(index.resolve_path("a/b/c.md"), Some("Widget"));
        assert_eq!(
            index.resolve_path("../02-design/README.md"),
            Some("Design Phase")
        );
        assert_eq!(
            index.resolve_path("./artifacts/feature-specification/template.md"),
            Some("Feature Specification Template")
        );
        assert_eq!(index.resolve_path("../missing.md"), None);
        assert_eq!(index.resolve_path("../"), None);
    }

    #[test]
    fn test_resolve_by_stem() {
        let index = sample_index();
        assert_eq!(index.resolve_path("elsewhere/c"), None);
        assert_eq!(index.resolve_name("c"), Some("Widget"));
        assert_eq!(index.resolve_name("Gadget"), Some("Widget"));
        assert_eq!(index.resolve_name("Widget"), Some("Widget"));
    }

    #[test]
    fn test_same_file_name_elsewhere_not_resolved() {
        let index = LinkIndex::build(&[doc("helix/phases/02-design/README.md", "Design Phase")]);
        assert_eq!(index.resolve_path("../phases/01-frame/README.md"), None);
        assert_eq!(index.resolve_path("../02-design/README.md"), Some("Design Phase"));
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        let docs = vec![
            doc("z/guide/setup.md", "Z Setup"),
            doc("a/guide/setup.md", "A Setup"),
        ];
        let index = LinkIndex::build(&docs);
        assert_eq!(index.resolve_path("../guide/setup.md"), Some("A Setup"));
    }

    #[test]
    fn test_segment_aligned_suffix_preferred() {
        let docs = vec![doc("a/mysetup.md", "Mine"), doc("b/setup.md", "Setup")];
        let index = LinkIndex::build(&docs);
        assert_eq!(index.resolve_path("setup.md"), Some("Setup"));
    }

    #[test]
    fn test_collision_last_write_wins() {
        let docs = vec![
            Document::new("one.md", "").with_metadata(Metadata::titled("Shared").with_aliases(["S"])),
            Document::new("two.md", "").with_metadata(Metadata::titled("Shared").with_aliases(["S"])),
            Document::new("three.md", "").with_metadata(Metadata::titled("Other").with_aliases(["S"])),
        ];
        let index = LinkIndex::build(&docs);
        assert_eq!(index.path_for_title("Shared"), Some("two.md"));
        assert_eq!(index.title_for_alias("S"), Some("Other"));
    }

    #[test]
    fn test_significant_path() {
        assert_eq!(significant_path("../../a/b.md"), "a/b.md");
        assert_eq!(significant_path("./../a.md"), "a.md");
        assert_eq!(significant_path("/abs/c.md"), "abs/c.md");
    }
}
