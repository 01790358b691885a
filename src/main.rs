//! xcode-parallel-test - parallel xcodebuild test runner
//!
//! Builds a scheme once for testing, then runs its test targets in
//! parallel, one job per destination at a time. Targets are read from the
//! shared scheme unless listed explicitly.
//!
//! ## Features
//!
//! - Bounded pool of destinations (simulators or devices), each used by one job at a time
//! - Optional batching: targets split into one contiguous batch per destination
//! - One log per job under `<build>/logs`
//! - Distinct exit codes for configuration errors, build failures and test failures
//!
//! ## Usage
//!
//! ```bash
//! # Run every testable of the shared App scheme
//! xcode-parallel-test test --config ci.yml --project App.xcodeproj --scheme App
//!
//! # Batch targets, one batch per destination
//! xcode-parallel-test test --config ci.yml --workspace App.xcworkspace \
//!     --project App.xcodeproj --scheme App --batching
//!
//! # Show the jobs without running them
//! xcode-parallel-test plan --config ci.yml --project App.xcodeproj --scheme App -t AppTests
//! ```

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

mod cli;
mod config;
mod error;
mod executor;
mod models;
mod output;
mod results;
mod utils;
mod xcode;

use cli::{Args, RunArgs};
use config::{EnvConfig, RunSettings};
use error::RunError;
use executor::JobScheduler;
use output::{OutputFormat, SummaryFormatter};
use results::BuildLayout;
use utils::{init_logger, LogLevel};
use xcode::{SchemeTargets, StaticTargets, TargetSource, XcodebuildCommand, XcodebuildExecutor};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let env = EnvConfig::load();

    init_logger(LogLevel::resolve(args.verbose, env.log.as_deref()));

    let result = match args.command {
        cli::Command::Test(run_args) => run_tests(run_args, &env).await,
        cli::Command::Plan(run_args) => plan_jobs(run_args, &env),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.is_test_failure() {
                error!("{err}, see the job logs for details");
            } else {
                error!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

fn load_settings(args: &RunArgs, env: &EnvConfig) -> Result<RunSettings, RunError> {
    RunSettings::load(&args.overrides(), env)
        .map_err(|e| RunError::Configuration(format!("{e:#}")))
}

fn formatter(format: &str) -> SummaryFormatter {
    let format = OutputFormat::from_str(format).unwrap_or_else(|| {
        warn!("Unknown output format '{format}', using table");
        OutputFormat::Table
    });

    let formatter = SummaryFormatter::new(format);
    if std::io::stdout().is_terminal() {
        formatter
    } else {
        formatter.no_color()
    }
}

/// Explicit targets when given, otherwise the testables of the shared scheme
fn test_targets(args: &RunArgs, settings: &RunSettings) -> Result<Vec<String>, RunError> {
    if !settings.targets.is_empty() {
        return StaticTargets::new(settings.targets.clone()).test_targets();
    }

    let kind = args.project_kind();
    let scheme = SchemeTargets::new(kind.project_path(), &args.scheme);
    info!("Reading test targets from {}", scheme.path().display());
    scheme.test_targets()
}

async fn run_tests(args: RunArgs, env: &EnvConfig) -> Result<(), RunError> {
    let settings = load_settings(&args, env)?;
    let targets = test_targets(&args, &settings)?;
    let mut scheduler = JobScheduler::new(
        args.scheme.clone(),
        settings.destinations.clone(),
        settings.batching,
    )?;

    let layout = BuildLayout::new(&settings.build_dir);
    layout.prepare().await?;

    let kind = args.project_kind();
    info!(
        "Testing scheme {} of {} on {} destinations",
        args.scheme,
        kind,
        settings.destinations.len()
    );

    let command = XcodebuildCommand::new(kind, args.scheme.clone(), layout.data_dir());
    let executor = Arc::new(
        XcodebuildExecutor::new(settings.xcodebuild.clone(), command, layout.clone())
            .with_timeout(settings.timeout),
    );

    let summary = scheduler.run(&targets, executor).await?;
    info!("Run finished: {}", scheduler.phase());

    println!("{}", formatter(&args.format).format_summary(&summary));
    if let Err(e) = results::save_summary(&summary, &layout.summary_path()) {
        warn!("Could not save run summary: {e:#}");
    }

    summary.into_result().map(|_| ())
}

fn plan_jobs(args: RunArgs, env: &EnvConfig) -> Result<(), RunError> {
    let settings = load_settings(&args, env)?;
    let targets = test_targets(&args, &settings)?;
    let scheduler = JobScheduler::new(
        args.scheme.clone(),
        settings.destinations.clone(),
        settings.batching,
    )?;

    let units = scheduler.plan_units(&targets);
    println!(
        "{}",
        formatter(&args.format).format_plan(scheduler.destinations(), &units, settings.batching)
    );
    Ok(())
}
