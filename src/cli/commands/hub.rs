//! Hub Commands
//!
//! Renders the navigation hub and per-phase indexes.

use std::path::{Path, PathBuf};

use crate::cli::ui::Output;
use crate::cli::util::{CommandContext, write_file};
use crate::types::{Phase, Result};

/// Output target for rendered documents; `-` means stdout
fn emit(content: &str, target: &Path, output: &Output) -> Result<()> {
    if target == Path::new("-") {
        print!("{}", content);
        return Ok(());
    }
    write_file(target, content)?;
    output.written(target);
    Ok(())
}

/// Render the navigation hub to `target`, or to the configured hub file
pub fn run(ctx: &CommandContext, target: Option<PathBuf>, output: &Output) -> Result<()> {
    let content = ctx.config.navigation.generator().build_hub(&ctx.documents);
    let target = target.unwrap_or_else(|| PathBuf::from(&ctx.config.navigation.hub_file));
    emit(&content, &target, output)
}

/// Render one phase index to `target`, or to stdout
pub fn run_phase_index(
    ctx: &CommandContext,
    phase: Phase,
    target: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let content = ctx
        .config
        .navigation
        .generator()
        .build_phase_index(phase.id(), &ctx.documents);
    let target = target.unwrap_or_else(|| PathBuf::from("-"));
    emit(&content, &target, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> CommandContext {
        let frame = dir.path().join("helix/phases/01-frame");
        fs::create_dir_all(frame.join("artifacts/user-stories")).unwrap();
        fs::write(frame.join("README.md"), "# Frame\n").unwrap();
        fs::write(frame.join("artifacts/user-stories/template.md"), "t").unwrap();
        let patterns = vec![format!("{}/helix/**/*.md", dir.path().display())];
        CommandContext::load(None, &patterns).unwrap()
    }

    #[test]
    fn test_hub_written_to_target() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let target = dir.path().join("NAV.md");

        run(&ctx, Some(target.clone()), &Output::quiet(true)).unwrap();

        let hub = fs::read_to_string(&target).unwrap();
        assert!(hub.starts_with("---\ntitle: "));
        assert!(hub.contains("- [[User Stories Template]] 🟡 *(Phase: Frame)*"));
    }

    #[test]
    fn test_phase_index_written_to_target() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let target = dir.path().join("frame-index.md");

        run_phase_index(&ctx, Phase::Frame, Some(target.clone()), &Output::quiet(true)).unwrap();

        let index = fs::read_to_string(&target).unwrap();
        assert!(index.starts_with("# Frame Phase Index"));
        assert!(index.contains("## Template\n\n- [[User Stories Template]]"));
    }
}
