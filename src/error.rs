//! Run-level error taxonomy
//!
//! Separates configuration problems, prerequisite build failures and
//! failing tests so the entry point can report each with its own exit code.

use thiserror::Error;

use crate::executor::PoolError;
use crate::xcode::ExecError;

/// Outcome of a run that did not succeed
#[derive(Error, Debug)]
pub enum RunError {
    /// Invalid or missing input, detected before the pool is built
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The prerequisite build step failed; no test job was scheduled
    #[error("setup failed: {source}")]
    Setup {
        #[source]
        source: ExecError,
    },

    /// At least one scheduled job failed
    #[error("tests failed ({failed_jobs} of {total_jobs} jobs)")]
    TestsFailed { failed_jobs: usize, total_jobs: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RunError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::TestsFailed { .. } => 1,
            RunError::Configuration(_) => 2,
            RunError::Setup { .. } => 3,
            RunError::Io(_) => 4,
        }
    }

    pub fn is_test_failure(&self) -> bool {
        matches!(self, RunError::TestsFailed { .. })
    }
}

impl From<PoolError> for RunError {
    fn from(err: PoolError) -> Self {
        RunError::Configuration(err.to_string())
    }
}
