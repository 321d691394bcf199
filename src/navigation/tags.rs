//! Hierarchical tag taxonomy with per-tag usage counts.

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNode {
    /// Last segment, e.g. `template`
    pub name: String,
    /// Full tag, e.g. `helix/artifact/template`
    pub full_path: String,
    /// Full paths of direct children
    pub children: BTreeSet<String>,
    /// Documents tagged with exactly this tag
    pub files: Vec<String>,
}

/// Tag tree keyed by full tag path. Adding `a/b/c` creates `a`, `a/b` and
/// `a/b/c`; only `a/b/c` receives the file and the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTree {
    nodes: BTreeMap<String, TagNode>,
    counts: BTreeMap<String, usize>,
}

impl TagTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: &str, file: &str) {
        let tag = tag.trim().trim_start_matches('#');
        if tag.is_empty() {
            return;
        }
        *self.counts.entry(tag.to_string()).or_default() += 1;

        let mut parent: Option<String> = None;
        let mut full_path = String::new();
        for segment in tag.split('/').filter(|s| !s.is_empty()) {
            if !full_path.is_empty() {
                full_path.push('/');
            }
            full_path.push_str(segment);

            self.nodes
                .entry(full_path.clone())
                .or_insert_with(|| TagNode {
                    name: segment.to_string(),
                    full_path: full_path.clone(),
                    ..Default::default()
                });
            if let Some(parent) = &parent
                && let Some(node) = self.nodes.get_mut(parent)
            {
                node.children.insert(full_path.clone());
            }
            parent = Some(full_path.clone());
        }

        if let Some(node) = self.nodes.get_mut(&full_path) {
            node.files.push(file.to_string());
        }
    }

    pub fn get(&self, tag: &str) -> Option<&TagNode> {
        self.nodes.get(tag)
    }

    pub fn files_for(&self, tag: &str) -> &[String] {
        self.nodes
            .get(tag)
            .map(|n| n.files.as_slice())
            .unwrap_or(&[])
    }

    /// Number of documents carrying exactly `tag`
    pub fn count(&self, tag: &str) -> usize {
        self.counts.get(tag).copied().unwrap_or(0)
    }

    /// Tag → count for every tag used at least once, sorted by tag
    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    /// Top-level tags
    pub fn roots(&self) -> impl Iterator<Item = &TagNode> {
        self.nodes.values().filter(|n| !n.full_path.contains('/'))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
