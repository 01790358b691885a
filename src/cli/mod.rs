//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CliOverrides;
use crate::models::ProjectKind;

/// Run Xcode test targets in parallel across destinations
#[derive(Parser, Debug)]
#[command(name = "xcode-parallel-test")]
#[command(version)]
#[command(about = "Run xcodebuild test targets in parallel across a pool of destinations")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build for testing, then run every test target in parallel
    Test(RunArgs),

    /// Show the jobs a test run would schedule, without running them
    Plan(RunArgs),
}

/// Arguments shared by `test` and `plan`
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to config file listing destinations
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to workspace
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Path to project
    #[arg(short, long)]
    pub project: PathBuf,

    /// Name of the scheme
    #[arg(short, long)]
    pub scheme: String,

    /// Run xcodebuild in batches, one per destination
    #[arg(short, long)]
    pub batching: bool,

    /// Test target to run (repeatable; overrides the config file and the scheme)
    #[arg(short, long = "target", value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Per-job timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for derived data and logs
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

impl RunArgs {
    pub fn project_kind(&self) -> ProjectKind {
        ProjectKind::from_paths(self.project.clone(), self.workspace.clone())
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config: self.config.clone(),
            targets: self.targets.clone(),
            timeout_secs: self.timeout,
            build_dir: self.build_dir.clone(),
            batching: self.batching,
        }
    }
}
