//! xcodebuild argument construction

use std::path::PathBuf;

use crate::models::{Destination, ProjectKind};

/// Builds xcodebuild argument lists for one scheme
#[derive(Clone, Debug)]
pub struct XcodebuildCommand {
    kind: ProjectKind,
    scheme: String,
    derived_data: PathBuf,
}

impl XcodebuildCommand {
    pub fn new(kind: ProjectKind, scheme: impl Into<String>, derived_data: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            scheme: scheme.into(),
            derived_data: derived_data.into(),
        }
    }

    fn common_arguments(&self) -> Vec<String> {
        let mut args = self.kind.xcodebuild_arguments();
        args.extend([
            "-scheme".to_string(),
            self.scheme.clone(),
            "-derivedDataPath".to_string(),
            self.derived_data.display().to_string(),
        ]);
        args
    }

    /// `build-for-testing` against every destination
    pub fn build_for_testing(&self, destinations: &[Destination]) -> Vec<String> {
        let mut args = self.common_arguments();
        for destination in destinations {
            args.push("-destination".to_string());
            args.push(destination.to_string());
        }
        args.push("build-for-testing".to_string());
        args
    }

    /// `test-without-building` for `targets` on one destination
    pub fn test_without_building(&self, destination: &Destination, targets: &[String]) -> Vec<String> {
        let mut args = self.common_arguments();
        args.push("-destination".to_string());
        args.push(destination.to_string());
        args.extend(targets.iter().map(|t| format!("-only-testing:{t}")));
        args.push("test-without-building".to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> XcodebuildCommand {
        XcodebuildCommand::new(
            ProjectKind::from_paths("App.xcodeproj", None),
            "App",
            "build/data",
        )
    }

    #[test]
    fn test_build_for_testing_arguments() {
        let dests = vec![Destination::from("id=A"), Destination::from("id=B")];
        assert_eq!(
            command().build_for_testing(&dests),
            vec![
                "-project",
                "App.xcodeproj",
                "-scheme",
                "App",
                "-derivedDataPath",
                "build/data",
                "-destination",
                "id=A",
                "-destination",
                "id=B",
                "build-for-testing",
            ]
        );
    }

    #[test]
    fn test_test_without_building_arguments() {
        let targets = vec!["AppTests".to_string(), "AppUITests".to_string()];
        let args = command().test_without_building(&Destination::from("id=A"), &targets);
        assert_eq!(
            args[6..],
            [
                "-destination",
                "id=A",
                "-only-testing:AppTests",
                "-only-testing:AppUITests",
                "test-without-building",
            ]
        );
    }

    #[test]
    fn test_workspace_command() {
        let cmd = XcodebuildCommand::new(
            ProjectKind::from_paths("App.xcodeproj", Some("App.xcworkspace".into())),
            "App",
            "build/data",
        );
        let args = cmd.build_for_testing(&[]);
        assert_eq!(args[..2], ["-workspace", "App.xcworkspace"]);
        assert_eq!(args.last().map(String::as_str), Some("build-for-testing"));
    }
}
