//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::{Config, ConfigLoader};
use crate::index::LinkIndex;
use crate::loader::{expand_patterns, load_document};
use crate::types::{Document, HelixError, Result};

/// Command execution context
///
/// Holds the effective configuration and the loaded corpus. Documents and
/// their source paths are kept in the same order.
pub struct CommandContext {
    pub config: Config,
    pub paths: Vec<PathBuf>,
    pub documents: Vec<Document>,
}

impl CommandContext {
    /// Load configuration and every document named by `patterns`
    pub fn load(config_path: Option<&Path>, patterns: &[String]) -> Result<Self> {
        let config = load_config(config_path)?;
        let paths = expand_patterns(patterns)?;
        if paths.is_empty() {
            return Err(HelixError::Load {
                path: PathBuf::from(patterns.join(" ")),
                message: "no input files matched".to_string(),
            });
        }

        let documents = paths
            .iter()
            .map(|p| load_document(p))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = documents.len(), "Loaded corpus");

        Ok(Self {
            config,
            paths,
            documents,
        })
    }

    /// Index over the whole corpus
    pub fn index(&self) -> LinkIndex {
        LinkIndex::build(&self.documents)
    }

    /// Pairs of (source path, document)
    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &Document)> {
        self.paths.iter().zip(&self.documents)
    }
}

/// Effective configuration, with an optional explicit file from `--config`
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    ConfigLoader::load_in(Path::new("."), config_path)
}

/// Location of `source` under `dir`, keeping only its normal components
pub fn output_path(dir: &Path, source: &Path) -> PathBuf {
    let relative: PathBuf = source
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    dir.join(relative)
}

/// Write `content` to `path`, creating parent directories
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_path_strips_prefixes() {
        let out = Path::new("out");
        assert_eq!(
            output_path(out, Path::new("./helix/phases/README.md")),
            PathBuf::from("out/helix/phases/README.md")
        );
        assert_eq!(
            output_path(out, Path::new("../docs/a.md")),
            PathBuf::from("out/docs/a.md")
        );
        assert_eq!(
            output_path(out, Path::new("/abs/b.md")),
            PathBuf::from("out/abs/b.md")
        );
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c.md");
        write_file(&path, "x").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_context_loads_corpus_in_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, "---\ntitle: Alpha\n---\n").unwrap();
        fs::write(&b, "beta").unwrap();

        let patterns = vec![b.display().to_string(), a.display().to_string()];
        let ctx = CommandContext::load(None, &patterns).unwrap();
        let titles: Vec<_> = ctx.documents.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["B", "Alpha"]);
        assert_eq!(ctx.entries().next().unwrap().0, &b);
        assert!(ctx.index().has_title("Alpha"));
    }

    #[test]
    fn test_context_requires_input() {
        let dir = TempDir::new().unwrap();
        let patterns = vec![format!("{}/*.md", dir.path().display())];
        assert!(matches!(
            CommandContext::load(None, &patterns),
            Err(HelixError::Load { .. })
        ));
    }
}
