//! Job scheduling
//!
//! Runs the prerequisite build once, then one job per target (or per batch)
//! through the destination pool, and decides the outcome of the run.

use chrono::Utc;
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::{plan, DestinationPool};
use crate::error::RunError;
use crate::models::{Destination, RunPhase, RunSummary, WorkUnit};
use crate::utils::Stopwatch;
use crate::xcode::ExecError;

/// Executes the external tool for the scheduler
pub trait UnitExecutor: Send + Sync + 'static {
    /// Prerequisite step run once before any job; failure is fatal
    fn prepare<'a>(&'a self, destinations: &'a [Destination])
        -> BoxFuture<'a, Result<(), ExecError>>;

    /// Run one unit of work against one destination
    fn execute<'a>(
        &'a self,
        destination: &'a Destination,
        unit: &'a WorkUnit,
    ) -> BoxFuture<'a, Result<(), ExecError>>;
}

/// Drives one run from prerequisite build to final outcome
pub struct JobScheduler {
    scheme: String,
    destinations: Vec<Destination>,
    batching: bool,
    phase: RunPhase,
}

impl JobScheduler {
    pub fn new(
        scheme: impl Into<String>,
        destinations: Vec<Destination>,
        batching: bool,
    ) -> Result<Self, RunError> {
        let scheme = scheme.into();
        if scheme.trim().is_empty() {
            return Err(RunError::Configuration("scheme name is empty".to_string()));
        }
        if destinations.is_empty() {
            return Err(RunError::Configuration(
                "at least one destination is required".to_string(),
            ));
        }

        Ok(Self {
            scheme,
            destinations,
            batching,
            phase: RunPhase::Idle,
        })
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// Jobs this scheduler would submit for `targets`
    pub fn plan_units(&self, targets: &[String]) -> Vec<WorkUnit> {
        if self.batching {
            plan(targets, self.destinations.len())
                .into_iter()
                .enumerate()
                .map(|(index, targets)| WorkUnit::Batch { index, targets })
                .collect()
        } else {
            targets
                .iter()
                .map(|target| WorkUnit::Single {
                    target: target.clone(),
                })
                .collect()
        }
    }

    /// Build, run every job and summarize
    ///
    /// Returns `Err` only for setup and configuration failures; failing
    /// jobs are reported through [`RunSummary::success`].
    pub async fn run<E: UnitExecutor>(
        &mut self,
        targets: &[String],
        executor: Arc<E>,
    ) -> Result<RunSummary, RunError> {
        if self.phase != RunPhase::Idle {
            return Err(RunError::Configuration(format!(
                "scheduler already used (phase: {})",
                self.phase
            )));
        }

        let started_at = Utc::now();
        let mut stopwatch = Stopwatch::new();

        self.advance(RunPhase::Prerequisite);
        info!(
            "Building scheme {} for {} destinations",
            self.scheme,
            self.destinations.len()
        );
        if let Err(source) = executor.prepare(&self.destinations).await {
            self.advance(RunPhase::Failed);
            error!("Prerequisite build failed: {source}");
            return Err(RunError::Setup { source });
        }
        stopwatch.lap("build");

        self.advance(RunPhase::Scheduling);
        let units = self.plan_units(targets);
        info!(
            "Scheduling {} jobs for {} targets across {} destinations",
            units.len(),
            targets.len(),
            self.destinations.len()
        );

        let mut pool = DestinationPool::new(self.destinations.clone())?;
        for unit in units {
            let executor = Arc::clone(&executor);
            pool.submit(move |destination| async move {
                info!("Running {unit} on {destination}");
                executor.execute(&destination, &unit).await?;
                info!("Passed {unit} on {destination}");
                Ok::<(), ExecError>(())
            })
            .await?;
        }

        let success = pool.wait_for_finish().await;
        stopwatch.lap("tests");

        self.advance(if success {
            RunPhase::AllSucceeded
        } else {
            RunPhase::SomeFailed
        });
        debug!("Run timings:\n{}", stopwatch.format());

        Ok(RunSummary {
            scheme: self.scheme.clone(),
            batching: self.batching,
            destinations: self.destinations.len(),
            targets: targets.len(),
            jobs: pool.submitted(),
            failed_jobs: pool.failed_jobs(),
            success,
            build_ms: stopwatch.lap_ms("build"),
            tests_ms: stopwatch.lap_ms("tests"),
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn advance(&mut self, next: RunPhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal transition {} -> {}",
            self.phase,
            next
        );
        debug!("Run phase: {} -> {}", self.phase, next);
        self.phase = next;
    }
}
