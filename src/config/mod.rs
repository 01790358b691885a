//! Configuration module
//!
//! Merges the config file, environment and command line into one set of
//! run settings. The command line wins over the environment, which wins
//! over the file.

mod env;
mod file;

pub use env::EnvConfig;
pub use file::ConfigFile;

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Destination;

/// Values given on the command line
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub targets: Vec<String>,
    pub timeout_secs: Option<u64>,
    pub build_dir: Option<PathBuf>,
    pub batching: bool,
}

/// Fully resolved settings for one run
#[derive(Clone, Debug)]
pub struct RunSettings {
    pub destinations: Vec<Destination>,
    pub targets: Vec<String>,
    pub timeout: Option<Duration>,
    pub build_dir: PathBuf,
    pub xcodebuild: String,
    pub batching: bool,
}

impl RunSettings {
    /// Locate and load the config file, then apply overrides
    pub fn load(cli: &CliOverrides, env: &EnvConfig) -> Result<Self> {
        let path = cli
            .config
            .clone()
            .or_else(|| env.config_file.as_ref().map(PathBuf::from))
            .or_else(ConfigFile::find)
            .context("No config file given and none found in the default locations")?;

        let file = ConfigFile::load(&path)?;
        Self::resolve(file, env, cli)
    }

    pub fn resolve(file: ConfigFile, env: &EnvConfig, cli: &CliOverrides) -> Result<Self> {
        let targets = if cli.targets.is_empty() {
            file.targets
        } else {
            cli.targets.clone()
        };

        let timeout_secs = cli.timeout_secs.or(env.timeout).or(file.timeout_secs);
        if timeout_secs == Some(0) {
            anyhow::bail!("Timeout must be greater than zero");
        }

        let build_dir = cli
            .build_dir
            .clone()
            .or_else(|| env.build_dir.as_ref().map(PathBuf::from))
            .unwrap_or(file.build_dir);

        Ok(Self {
            destinations: file.destinations,
            targets,
            timeout: timeout_secs.map(Duration::from_secs),
            build_dir,
            xcodebuild: file.xcodebuild,
            batching: cli.batching || env.batching.unwrap_or(false),
        })
    }
}
