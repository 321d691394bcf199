//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/helixlink/) and project (.helixlink/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::hub;
use crate::lint::Severity;
use crate::links::ConversionOptions;
use crate::navigation::NavigationGenerator;
use crate::types::{HelixError, Result};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Which reference passes run during conversion
    pub conversion: ConversionConfig,

    /// Navigation hub rendering
    pub navigation: NavigationConfig,

    /// Lint and broken-link reporting
    pub validation: ValidationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            conversion: ConversionConfig::default(),
            navigation: NavigationConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `HelixError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.navigation.hub_title.trim().is_empty() {
            return Err(HelixError::Config(
                "navigation.hub_title must not be empty".to_string(),
            ));
        }

        if self.navigation.hub_file.trim().is_empty() {
            return Err(HelixError::Config(
                "navigation.hub_file must not be empty".to_string(),
            ));
        }

        self.validation.min_severity()?;

        Ok(())
    }
}

// =============================================================================
// Conversion
// =============================================================================

/// Toggles for the reference passes; explicit links are always converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub phase_references: bool,
    pub artifact_references: bool,
    pub workflow_references: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            phase_references: true,
            artifact_references: true,
            workflow_references: true,
        }
    }
}

impl From<&ConversionConfig> for ConversionOptions {
    fn from(config: &ConversionConfig) -> Self {
        Self {
            phase_references: config.phase_references,
            artifact_references: config.artifact_references,
            workflow_references: config.workflow_references,
        }
    }
}

// =============================================================================
// Navigation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub hub_title: String,

    /// Default output file for `helixlink hub`
    pub hub_file: String,

    /// Emit the query-snippet section
    pub include_queries: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            hub_title: hub::TITLE.to_string(),
            hub_file: hub::FILE_NAME.to_string(),
            include_queries: true,
        }
    }
}

impl NavigationConfig {
    pub fn generator(&self) -> NavigationGenerator {
        NavigationGenerator::new()
            .with_title(&self.hub_title)
            .with_queries(self.include_queries)
    }
}

// =============================================================================
// Validation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Lowest severity printed: error, warning or info
    pub min_severity: String,

    /// Exit non-zero when broken wikilinks are found
    pub fail_on_broken_links: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_severity: "warning".to_string(),
            fail_on_broken_links: true,
        }
    }
}

impl ValidationConfig {
    pub fn min_severity(&self) -> Result<Severity> {
        self.min_severity.parse()
    }
}
