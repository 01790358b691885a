//! xcodebuild integration
//!
//! Builds xcodebuild command lines and runs them as logged subprocesses.

mod command;
mod process;
mod targets;

pub use command::XcodebuildCommand;
pub use process::run_logged;
pub use targets::{SchemeTargets, StaticTargets, TargetSource};

use futures::future::BoxFuture;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::executor::UnitExecutor;
use crate::models::{Destination, WorkUnit};
use crate::results::BuildLayout;

/// Failure of one external command
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {code}, see {}", .log.display())]
    NonZeroExit {
        program: String,
        code: i32,
        log: PathBuf,
    },

    #[error("{program} was terminated by a signal, see {}", .log.display())]
    Terminated { program: String, log: PathBuf },

    #[error("{program} timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot open log file {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs builds and test jobs through xcodebuild
pub struct XcodebuildExecutor {
    program: String,
    command: XcodebuildCommand,
    layout: BuildLayout,
    timeout: Option<Duration>,
}

impl XcodebuildExecutor {
    pub fn new(program: impl Into<String>, command: XcodebuildCommand, layout: BuildLayout) -> Self {
        Self {
            program: program.into(),
            command,
            layout,
            timeout: None,
        }
    }

    /// Deadline for each test job; the build itself is never cut short
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl UnitExecutor for XcodebuildExecutor {
    fn prepare<'a>(&'a self, destinations: &'a [Destination]) -> BoxFuture<'a, Result<(), ExecError>> {
        Box::pin(async move {
            let args = self.command.build_for_testing(destinations);
            run_logged(&self.program, &args, &self.layout.build_log(), None).await
        })
    }

    fn execute<'a>(
        &'a self,
        destination: &'a Destination,
        unit: &'a WorkUnit,
    ) -> BoxFuture<'a, Result<(), ExecError>> {
        Box::pin(async move {
            let args = self.command.test_without_building(destination, unit.targets());
            let log = self.layout.log_path(&unit.log_stem());
            run_logged(&self.program, &args, &log, self.timeout).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectKind;
    use tempfile::tempdir;

    fn executor(program: &str, root: &std::path::Path) -> XcodebuildExecutor {
        let layout = BuildLayout::new(root.join("build"));
        std::fs::create_dir_all(layout.logs_dir()).unwrap();
        let command = XcodebuildCommand::new(
            ProjectKind::from_paths("App.xcodeproj", None),
            "App",
            layout.data_dir(),
        );
        XcodebuildExecutor::new(program, command, layout)
    }

    #[tokio::test]
    async fn test_prepare_writes_build_log() {
        let dir = tempdir().unwrap();
        let exec = executor("echo", dir.path());

        exec.prepare(&[Destination::from("id=A")]).await.unwrap();

        let log = std::fs::read_to_string(exec.layout.build_log()).unwrap();
        assert!(log.contains("-destination id=A build-for-testing"));
    }

    #[tokio::test]
    async fn test_execute_writes_job_log() {
        let dir = tempdir().unwrap();
        let exec = executor("echo", dir.path());
        let unit = WorkUnit::Single {
            target: "AppTests".to_string(),
        };

        exec.execute(&Destination::from("id=B"), &unit).await.unwrap();

        let log = std::fs::read_to_string(exec.layout.log_path("test-AppTests")).unwrap();
        assert!(log.contains("-only-testing:AppTests test-without-building"));
    }

    #[tokio::test]
    async fn test_execute_failure_is_reported() {
        let dir = tempdir().unwrap();
        let exec = executor("false", dir.path());
        let unit = WorkUnit::Batch {
            index: 0,
            targets: vec!["AppTests".to_string()],
        };

        let err = exec.execute(&Destination::from("id=A"), &unit).await.unwrap_err();
        assert!(matches!(err, ExecError::NonZeroExit { code: 1, .. }));
    }

    #[test]
    fn test_failed_build_is_logged() {
        let dir = tempdir().unwrap();
        let exec = executor("false", dir.path());

        let result = tokio_test::block_on(exec.prepare(&[Destination::from("id=A")]));

        let err = tokio_test::assert_err!(result);
        assert!(err.to_string().contains("xcodebuild.log"));
        assert!(exec.layout.build_log().exists());
    }

    #[test]
    fn test_error_messages() {
        let err = ExecError::TimedOut {
            program: "xcodebuild".to_string(),
            timeout: Duration::from_secs(600),
        };
        assert_eq!(err.to_string(), "xcodebuild timed out after 600s");

        let err = ExecError::NonZeroExit {
            program: "xcodebuild".to_string(),
            code: 65,
            log: PathBuf::from("build/logs/test-0.log"),
        };
        assert_eq!(
            err.to_string(),
            "xcodebuild exited with status 65, see build/logs/test-0.log"
        );
    }
}
