//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/helixlink/config.toml)
//! 3. Project config (.helixlink/config.toml)
//! 4. Explicit `--config` file, when given
//! 5. Environment variables (HELIXLINK_* prefix, `__` between sections)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::config::{APP_NAME, CONFIG_FILE, ENV_PREFIX, PROJECT_DIR};
use crate::types::{HelixError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the current directory:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_in(Path::new("."), None)
    }

    /// Load configuration for `project_root`, with an optional explicit file
    /// merged above the project config
    pub fn load_in(project_root: &Path, explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path(project_root);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(HelixError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        // Merge environment variables (e.g., HELIXLINK_NAVIGATION__HUB_TITLE -> navigation.hub_title)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        Self::extract(figment)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        Self::extract(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file(path)),
        )
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .map_err(|e| HelixError::Config(format!("Configuration error: {}", e)))?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/helixlink/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .or_else(|| directories::BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .map(|p| p.join(APP_NAME))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Get path to project config file
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join(CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        // Global config
        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        // Project config
        let project = Self::project_config_path(Path::new("."));
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as TOML or JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| HelixError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize global configuration
    pub fn init_global(force: bool) -> Result<PathBuf> {
        let global_dir = Self::global_dir().ok_or_else(|| {
            HelixError::Config("Cannot determine global config directory".to_string())
        })?;
        Self::write_default(&global_dir.join(CONFIG_FILE), force)
    }

    /// Initialize project configuration under `project_root`
    pub fn init_project(project_root: &Path, force: bool) -> Result<PathBuf> {
        Self::write_default(&Self::project_config_path(project_root), force)
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn write_default(config_path: &Path, force: bool) -> Result<PathBuf> {
        if let Some(dir) = config_path.parent() {
            fs::create_dir_all(dir)?;
        }

        if !config_path.exists() || force {
            fs::write(config_path, Self::default_config())?;
            info!("Created config: {}", config_path.display());
        } else {
            info!("Config exists: {}", config_path.display());
        }

        Ok(config_path.to_path_buf())
    }

    /// Default config content (TOML)
    fn default_config() -> String {
        r#"# helixlink Configuration
# Project settings in .helixlink/config.toml override ~/.config/helixlink/config.toml.

version = "1.0"

# Reference passes run by `helixlink convert` (explicit links are always converted)
[conversion]
phase_references = true
artifact_references = true
workflow_references = true

# Navigation hub rendered by `helixlink hub`
[navigation]
hub_title = "HELIX Workflow Navigator"
hub_file = "NAVIGATOR.md"
include_queries = true

# Reporting for `helixlink validate`
[validation]
min_severity = "warning"
fail_on_broken_links = true
"#
        .to_string()
    }
}
