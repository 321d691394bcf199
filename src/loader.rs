//! Document Loading
//!
//! Reads explicitly named markdown files, splits off the YAML frontmatter and
//! attaches parsed metadata. No directory walking: callers pass file paths or
//! glob patterns.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::{Document, HelixError, Metadata, Result};

const DELIMITER: &str = "---";

/// Byte offsets of a frontmatter block: (yaml start, yaml end, body start)
fn locate_frontmatter(text: &str) -> Option<(usize, usize, usize)> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end_matches('\r') != DELIMITER {
        return None;
    }

    let yaml_start = first_end + 1;
    let mut pos = yaml_start;
    loop {
        let line_end = text[pos..].find('\n').map(|i| pos + i);
        let line = &text[pos..line_end.unwrap_or(text.len())];
        if line.trim_end_matches('\r') == DELIMITER {
            let body_start = line_end.map(|e| e + 1).unwrap_or(text.len());
            return Some((yaml_start, pos, body_start));
        }
        pos = line_end? + 1;
    }
}

/// Split `text` into its YAML frontmatter (without delimiters) and body.
///
/// An unterminated block counts as no frontmatter.
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    match locate_frontmatter(text) {
        Some((start, end, body)) => (Some(&text[start..end]), &text[body..]),
        None => (None, text),
    }
}

/// Parse the frontmatter of `text` into [`Metadata`], if present
pub fn parse_metadata(path: &Path, text: &str) -> Result<Option<Metadata>> {
    let (Some(yaml), _) = split_frontmatter(text) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(Some(Metadata::default()));
    }
    serde_yaml::from_str(yaml)
        .map(Some)
        .map_err(|e| HelixError::frontmatter(path, e.to_string()))
}

/// Build a document from raw text. The frontmatter block is kept verbatim so
/// it can be written back untouched.
pub fn parse_document(path: &Path, text: &str) -> Result<Document> {
    let metadata = parse_metadata(path, text)?;
    let doc = match locate_frontmatter(text) {
        Some((_, _, body)) => {
            Document::new(path.to_string_lossy(), &text[body..]).with_frontmatter(&text[..body])
        }
        None => Document::new(path.to_string_lossy(), text),
    };
    Ok(match metadata {
        Some(meta) => doc.with_metadata(meta),
        None => doc,
    })
}

pub fn load_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path).map_err(|e| HelixError::load(path, e.to_string()))?;
    debug!(path = %path.display(), bytes = text.len(), "Loaded document");
    parse_document(path, &text)
}

pub fn load_documents<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Document>> {
    let documents = paths
        .iter()
        .map(|p| load_document(p.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = documents.len(), "Loaded documents");
    Ok(documents)
}

/// Expand glob patterns into file paths. Plain paths pass through unchanged;
/// duplicates are dropped, first occurrence wins.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !is_glob(pattern) {
            push_unique(&mut paths, PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|e| HelixError::Pattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        let mut matched = 0usize;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    matched += 1;
                    push_unique(&mut paths, path);
                }
                Ok(_) => {}
                Err(e) => warn!(pattern, error = %e, "Skipping unreadable path"),
            }
        }
        if matched == 0 {
            warn!(pattern, "Pattern matched no files");
        }
    }

    Ok(paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileType;
    use tempfile::TempDir;

    #[test]
    fn test_split_frontmatter() {
        let (front, body) = split_frontmatter("---\ntitle: A\n---\n# Body\n");
        assert_eq!(front, Some("title: A\n"));
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_frontmatter_crlf() {
        let (front, body) = split_frontmatter("---\r\ntitle: A\r\n---\r\nBody");
        assert_eq!(front, Some("title: A\r\n"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let (front, body) = split_frontmatter("---\ntitle: A\n---");
        assert_eq!(front, Some("title: A\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_frontmatter_absent_or_unterminated() {
        assert_eq!(split_frontmatter("# Title\n---\n"), (None, "# Title\n---\n"));
        assert_eq!(split_frontmatter("---\ntitle: A\n"), (None, "---\ntitle: A\n"));
        assert_eq!(split_frontmatter("---"), (None, "---"));
        assert_eq!(split_frontmatter(""), (None, ""));
    }

    #[test]
    fn test_parse_metadata() {
        let text = "---\ntitle: Frame Phase\ntype: phase\nphase_number: 1\naliases:\n  - Phase 1\ntags: [helix, helix/phase]\n---\nbody";
        let meta = parse_metadata(Path::new("a.md"), text).unwrap().unwrap();
        assert_eq!(meta.title, "Frame Phase");
        assert_eq!(meta.doc_type, "phase");
        assert_eq!(meta.phase_number, Some(1));
        assert_eq!(meta.aliases, vec!["Phase 1"]);
        assert_eq!(meta.tags.len(), 2);
    }

    #[test]
    fn test_parse_metadata_empty_block() {
        let meta = parse_metadata(Path::new("a.md"), "---\n---\nbody").unwrap();
        assert_eq!(meta, Some(Metadata::default()));
    }

    #[test]
    fn test_parse_metadata_invalid_yaml() {
        let err = parse_metadata(Path::new("bad.md"), "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, HelixError::Frontmatter { .. }));
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_parse_document_keeps_frontmatter_block() {
        let text = "---\ntitle: Custom\n---\nSee the Design phase.\n";
        let doc = parse_document(Path::new("helix/phases/01-frame/README.md"), text).unwrap();
        assert_eq!(doc.file_type, FileType::Phase);
        assert_eq!(doc.title(), "Custom");
        assert_eq!(doc.content, "See the Design phase.\n");
        assert_eq!(doc.render(&doc.content), text);
    }

    #[test]
    fn test_load_documents_from_disk() {
        let dir = TempDir::new().unwrap();
        let phase_dir = dir.path().join("helix/phases/02-design");
        std::fs::create_dir_all(&phase_dir).unwrap();
        let readme = phase_dir.join("README.md");
        std::fs::write(&readme, "# Design\n").unwrap();
        let notes = dir.path().join("notes.md");
        std::fs::write(&notes, "---\ntitle: Notes\n---\ntext").unwrap();

        let docs = load_documents(&[readme, notes]).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].title(), "Design Phase");
        assert!(!docs[0].has_metadata());
        assert_eq!(docs[1].title(), "Notes");
        assert_eq!(docs[1].content, "text");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, HelixError::Load { .. }));
    }

    #[test]
    fn test_expand_patterns() {
        let dir = TempDir::new().unwrap();
        for name in ["b.md", "a.md", "c.txt"] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        let pattern = format!("{}/*.md", dir.path().display());
        let plain = dir.path().join("a.md").display().to_string();

        let paths = expand_patterns(&[pattern, plain]).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_expand_invalid_pattern() {
        let err = expand_patterns(&["docs/[*.md"]).unwrap_err();
        assert!(matches!(err, HelixError::Pattern { .. }));
    }
}
