//! Configuration file management
//!
//! Handles finding, loading, and validating configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::models::Destination;

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./xcode-parallel-test.yml",
    "./xcode-parallel-test.yaml",
    "./.xcode-parallel-test.yml",
    "~/.config/xcode-parallel-test/config.yml",
];

/// Configuration file structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Destination specifiers, one per concurrent job
    pub destinations: Vec<Destination>,

    /// Test targets to run
    #[serde(default)]
    pub targets: Vec<String>,

    /// Deadline for each test job in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Directory for derived data and logs
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// xcodebuild program to run
    #[serde(default = "default_xcodebuild")]
    pub xcodebuild: String,
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_xcodebuild() -> String {
    "xcodebuild".to_string()
}

impl ConfigFile {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.destinations.is_empty() {
            anyhow::bail!("At least one destination is required");
        }

        let mut seen = HashSet::new();
        for destination in &self.destinations {
            if destination.as_str().trim().is_empty() {
                anyhow::bail!("Destination specifiers must not be empty");
            }
            if !seen.insert(destination) {
                warn!(
                    "Destination {destination} is listed more than once and may run two jobs at a time"
                );
            }
        }

        if self.timeout_secs == Some(0) {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        if self.xcodebuild.trim().is_empty() {
            anyhow::bail!("xcodebuild program must not be empty");
        }

        Ok(())
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
