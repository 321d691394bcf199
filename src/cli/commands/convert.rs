//! Convert Command
//!
//! Rewrites markdown links and workflow references as wikilinks. The index is
//! built from every input before any document is converted; frontmatter is
//! written back untouched.

use std::path::PathBuf;

use tracing::info;

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, output_path, write_file};
use crate::links::{ConversionOptions, ConversionStats, LinkConverter};
use crate::types::{HelixError, Result};

/// Where converted documents go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Print the single converted document
    Stdout,
    /// Mirror inputs under a directory
    Directory(PathBuf),
    /// Overwrite inputs that changed
    InPlace,
    /// Report files that would change; write nothing
    Check,
}

pub fn run(ctx: &CommandContext, destination: &Destination, output: &Output) -> Result<()> {
    if *destination == Destination::Stdout && ctx.documents.len() > 1 {
        return Err(HelixError::Context(
            "multiple inputs need --output DIR, --in-place or --check".to_string(),
        ));
    }

    let index = ctx.index();
    let converter =
        LinkConverter::new(&index).with_options(ConversionOptions::from(&ctx.config.conversion));

    let mut totals = ConversionStats::default();
    let mut changed = 0usize;

    for (path, doc) in ctx.entries() {
        let (converted, stats) = converter.convert_with_stats(&doc.content);
        totals.merge(&stats);
        let is_changed = converted != doc.content;
        if is_changed {
            changed += 1;
        }

        match destination {
            Destination::Stdout => print!("{}", doc.render(&converted)),
            Destination::Directory(dir) => {
                let target = output_path(dir, path);
                write_file(&target, &doc.render(&converted))?;
                output.written(&target);
            }
            Destination::InPlace => {
                if is_changed {
                    write_file(path, &doc.render(&converted))?;
                    output.written(path);
                }
            }
            Destination::Check => {
                if is_changed {
                    output.would_change(path, &stats);
                }
            }
        }
    }

    info!(
        files = ctx.documents.len(),
        changed,
        replacements = totals.total(),
        "Conversion finished"
    );
    output.conversion_summary(ctx.documents.len(), changed, &totals);

    if *destination == Destination::Check && changed > 0 {
        return Err(HelixError::WouldChange { count: changed });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn corpus(dir: &TempDir) -> Vec<String> {
        let phases = dir.path().join("helix/phases");
        fs::create_dir_all(phases.join("01-frame")).unwrap();
        fs::create_dir_all(phases.join("02-design")).unwrap();
        fs::write(
            phases.join("01-frame/README.md"),
            "---\ntitle: Frame Phase\n---\nNext, see [the design](../02-design/README.md).\n",
        )
        .unwrap();
        fs::write(phases.join("02-design/README.md"), "Already [[Frame Phase]].\n").unwrap();
        vec![format!("{}/helix/phases/*/README.md", dir.path().display())]
    }

    #[test]
    fn test_convert_into_directory() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::load(None, &corpus(&dir)).unwrap();
        let out = dir.path().join("out");

        run(&ctx, &Destination::Directory(out.clone()), &Output::quiet(true)).unwrap();

        let frame = output_path(&out, &ctx.paths[0]);
        assert_eq!(
            fs::read_to_string(frame).unwrap(),
            "---\ntitle: Frame Phase\n---\nNext, see [[Design Phase|the design]].\n"
        );
    }

    #[test]
    fn test_check_reports_pending_changes() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::load(None, &corpus(&dir)).unwrap();
        let err = run(&ctx, &Destination::Check, &Output::quiet(true)).unwrap_err();
        assert!(matches!(err, HelixError::WouldChange { count: 1 }));
    }

    #[test]
    fn test_in_place_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let patterns = corpus(&dir);

        let ctx = CommandContext::load(None, &patterns).unwrap();
        run(&ctx, &Destination::InPlace, &Output::quiet(true)).unwrap();

        let ctx = CommandContext::load(None, &patterns).unwrap();
        assert!(run(&ctx, &Destination::Check, &Output::quiet(true)).is_ok());
    }

    #[test]
    fn test_stdout_requires_single_input() {
        let dir = TempDir::new().unwrap();
        let ctx = CommandContext::load(None, &corpus(&dir)).unwrap();
        assert!(run(&ctx, &Destination::Stdout, &Output::quiet(true)).is_err());
    }
}
