//! Xcode project descriptions

use std::fmt;
use std::path::{Path, PathBuf};

/// What xcodebuild is pointed at
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectKind {
    /// A standalone `.xcodeproj`
    Project { path: PathBuf },

    /// An `.xcworkspace`, plus the project that owns the scheme
    Workspace { path: PathBuf, project: PathBuf },
}

impl ProjectKind {
    /// Build from command-line options; a workspace wins when given
    pub fn from_paths(project: impl Into<PathBuf>, workspace: Option<PathBuf>) -> Self {
        match workspace {
            Some(path) => ProjectKind::Workspace {
                path,
                project: project.into(),
            },
            None => ProjectKind::Project {
                path: project.into(),
            },
        }
    }

    /// The `.xcodeproj` that owns the scheme
    pub fn project_path(&self) -> &Path {
        match self {
            ProjectKind::Project { path } => path,
            ProjectKind::Workspace { project, .. } => project,
        }
    }

    /// `-project <path>` or `-workspace <path>`
    pub fn xcodebuild_arguments(&self) -> Vec<String> {
        match self {
            ProjectKind::Project { path } => {
                vec!["-project".to_string(), path.display().to_string()]
            }
            ProjectKind::Workspace { path, .. } => {
                vec!["-workspace".to_string(), path.display().to_string()]
            }
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectKind::Project { path } => write!(f, "project {}", path.display()),
            ProjectKind::Workspace { path, .. } => write!(f, "workspace {}", path.display()),
        }
    }
}
