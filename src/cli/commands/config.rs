//! Config Command
//!
//! Manage helixlink configuration.
//!
//! Usage:
//!   helixlink config show [-f json]
//!   helixlink config path
//!   helixlink config init [-g] [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::cli::util::load_config;
use crate::config::ConfigLoader;
use crate::types::{HelixError, Result};

/// Show the effective configuration (merged from all sources)
pub fn show(config_path: Option<&Path>, format: &str) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" | "text" => false,
        other => {
            return Err(HelixError::Context(format!(
                "Invalid format '{}'. Valid values: toml, json",
                other
            )));
        }
    };
    let config = load_config(config_path)?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Write a default configuration file
pub fn init(global: bool, force: bool, output: &Output) -> Result<()> {
    let path = if global {
        ConfigLoader::init_global(force)?
    } else {
        ConfigLoader::init_project(Path::new("."), force)?
    };
    output.success(&format!(
        "Initialized {} configuration: {}",
        if global { "global" } else { "project" },
        path.display()
    ));
    Ok(())
}
