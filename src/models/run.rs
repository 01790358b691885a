//! Run lifecycle and summary models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RunError;

/// Phase of a single run
///
/// `Idle -> Prerequisite -> (Failed | Scheduling) -> (AllSucceeded | SomeFailed)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    Prerequisite,
    Scheduling,
    Failed,
    AllSucceeded,
    SomeFailed,
}

impl RunPhase {
    pub fn can_transition_to(self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Idle, RunPhase::Prerequisite)
                | (RunPhase::Prerequisite, RunPhase::Failed)
                | (RunPhase::Prerequisite, RunPhase::Scheduling)
                | (RunPhase::Scheduling, RunPhase::AllSucceeded)
                | (RunPhase::Scheduling, RunPhase::SomeFailed)
        )
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Idle => "idle",
            RunPhase::Prerequisite => "prerequisite",
            RunPhase::Scheduling => "scheduling",
            RunPhase::Failed => "failed",
            RunPhase::AllSucceeded => "all succeeded",
            RunPhase::SomeFailed => "some failed",
        };
        f.write_str(name)
    }
}

/// Summary of a finished scheduling phase
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    /// Scheme under test
    pub scheme: String,

    /// Whether targets were grouped into batches
    pub batching: bool,

    /// Number of destinations in the pool
    pub destinations: usize,

    /// Number of test targets
    pub targets: usize,

    /// Number of jobs submitted
    pub jobs: usize,

    /// Number of jobs that failed
    pub failed_jobs: usize,

    /// Pool outcome
    pub success: bool,

    /// Prerequisite build duration in milliseconds
    pub build_ms: u64,

    /// Scheduling phase duration in milliseconds
    pub tests_ms: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn passed_jobs(&self) -> usize {
        self.jobs - self.failed_jobs
    }

    pub fn total_ms(&self) -> u64 {
        self.build_ms + self.tests_ms
    }

    /// `Err(TestsFailed)` unless every job succeeded
    pub fn into_result(self) -> Result<Self, RunError> {
        if self.success {
            Ok(self)
        } else {
            Err(RunError::TestsFailed {
                failed_jobs: self.failed_jobs,
                total_jobs: self.jobs,
            })
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.batching { "batched" } else { "per target" };
        writeln!(
            f,
            "Scheme {} - {} targets, {} jobs ({}) on {} destinations",
            self.scheme, self.targets, self.jobs, mode, self.destinations
        )?;
        write!(
            f,
            "Passed: {} | Failed: {} | Build: {}ms | Tests: {}ms",
            self.passed_jobs(),
            self.failed_jobs,
            self.build_ms,
            self.tests_ms
        )
    }
}
