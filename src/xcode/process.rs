//! External process execution
//!
//! Runs a program with its output captured in a log file.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use super::ExecError;

/// Run `program` to completion with stdout and stderr written to `log_path`
///
/// With a `timeout`, a process still running at the deadline is killed and
/// reaped before `TimedOut` is returned, so callers never release resources
/// held by a process that is still alive.
pub async fn run_logged(
    program: &str,
    args: &[String],
    log_path: &Path,
    timeout: Option<Duration>,
) -> Result<(), ExecError> {
    let log_error = |source: std::io::Error| ExecError::Log {
        path: log_path.to_path_buf(),
        source,
    };
    let stdout = tokio::fs::File::create(log_path)
        .await
        .map_err(log_error)?
        .into_std()
        .await;
    let stderr = stdout.try_clone().map_err(log_error)?;

    debug!("{} {}", program, args.join(" "));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let wait_error = |source: std::io::Error| ExecError::Wait {
        program: program.to_string(),
        source,
    };

    let status = match timeout {
        None => child.wait().await.map_err(wait_error)?,
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status.map_err(wait_error)?,
            Err(_) => {
                warn!(
                    "{} exceeded {}s, killing it (log: {})",
                    program,
                    limit.as_secs(),
                    log_path.display()
                );
                child.kill().await.map_err(wait_error)?;
                return Err(ExecError::TimedOut {
                    program: program.to_string(),
                    timeout: limit,
                });
            }
        },
    };

    if status.success() {
        return Ok(());
    }

    match status.code() {
        Some(code) => Err(ExecError::NonZeroExit {
            program: program.to_string(),
            code,
            log: log_path.to_path_buf(),
        }),
        None => Err(ExecError::Terminated {
            program: program.to_string(),
            log: log_path.to_path_buf(),
        }),
    }
}
