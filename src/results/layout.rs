//! Build directory layout
//!
//! `<root>/data` holds derived data shared by every job, `<root>/logs`
//! holds one log per job plus the build log and run summary. Nothing else
//! under the root is touched.

use std::io;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Paths under the build directory
#[derive(Clone, Debug)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    /// Clear derived data and logs left by a previous run and recreate them
    pub async fn prepare(&self) -> io::Result<()> {
        for dir in [self.data_dir(), self.logs_dir()] {
            match fs::remove_dir_all(&dir).await {
                Ok(()) => debug!("Removed previous {}", dir.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
            fs::create_dir_all(&dir).await?;
        }
        Ok(())
    }

    /// Log file for a job with the given stem
    pub fn log_path(&self, stem: &str) -> PathBuf {
        self.logs_dir().join(format!("{stem}.log"))
    }

    /// Log file for the prerequisite build
    pub fn build_log(&self) -> PathBuf {
        self.log_path("xcodebuild")
    }

    pub fn summary_path(&self) -> PathBuf {
        self.logs_dir().join("summary.json")
    }
}
