use std::path::Path;

use console::style;

use crate::links::ConversionStats;

/// Console messages for command handlers
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    /// Suppress everything except errors
    pub fn quiet(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn written(&self, path: &Path) {
        self.success(&format!("Wrote {}", style(path.display()).bold()));
    }

    pub fn would_change(&self, path: &Path, stats: &ConversionStats) {
        self.warning(&format!(
            "{} would change ({} replacement(s))",
            path.display(),
            stats.total()
        ));
    }

    pub fn conversion_summary(&self, files: usize, changed: usize, stats: &ConversionStats) {
        self.info(&format!(
            "{} file(s), {} changed: {} resolved, {} unresolved, {} phase, {} artifact, {} workflow",
            files,
            changed,
            stats.resolved,
            stats.unresolved,
            stats.phase,
            stats.artifact,
            stats.workflow
        ));
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
