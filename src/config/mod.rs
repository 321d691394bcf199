//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/helixlink/config.toml)
//! 3. Project config (.helixlink/config.toml)
//! 4. Explicit `--config` file
//! 5. Environment variables (HELIXLINK_*)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
