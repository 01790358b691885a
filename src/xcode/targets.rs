//! Test target discovery
//!
//! Targets come either from an explicit list or from the `TestAction` of a
//! shared scheme (`<project>/xcshareddata/xcschemes/<scheme>.xcscheme`).

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::RunError;

/// Supplies the ordered list of test targets for a run
pub trait TargetSource {
    fn test_targets(&self) -> Result<Vec<String>, RunError>;
}

/// Targets given explicitly on the command line or in the config file
#[derive(Clone, Debug, Default)]
pub struct StaticTargets {
    targets: Vec<String>,
}

impl StaticTargets {
    pub fn new(targets: Vec<String>) -> Self {
        Self { targets }
    }
}

impl TargetSource for StaticTargets {
    /// Keeps first occurrences in order; blank names are rejected
    fn test_targets(&self) -> Result<Vec<String>, RunError> {
        normalize(&self.targets)
    }
}

/// Testables listed in a shared scheme
#[derive(Clone, Debug)]
pub struct SchemeTargets {
    scheme: String,
    path: PathBuf,
}

impl SchemeTargets {
    pub fn new(project: &Path, scheme: &str) -> Self {
        Self {
            scheme: scheme.to_string(),
            path: project
                .join("xcshareddata")
                .join("xcschemes")
                .join(format!("{scheme}.xcscheme")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TargetSource for SchemeTargets {
    fn test_targets(&self) -> Result<Vec<String>, RunError> {
        let xml = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => RunError::Configuration(format!(
                "no shared scheme named {} (looked for {})",
                self.scheme,
                self.path.display()
            )),
            _ => RunError::Configuration(format!(
                "cannot read scheme {}: {e}",
                self.path.display()
            )),
        })?;

        let names = blueprint_names(&xml).map_err(|e| {
            RunError::Configuration(format!("invalid scheme {}: {e}", self.path.display()))
        })?;
        debug!("Scheme {} lists {} testables", self.scheme, names.len());

        normalize(&names)
    }
}

/// `BlueprintName` of every testable under the scheme's `TestAction`
fn blueprint_names(xml: &str) -> Result<Vec<String>, roxmltree::Error> {
    let doc = roxmltree::Document::parse(xml)?;
    let Some(test_action) = doc.descendants().find(|n| n.has_tag_name("TestAction")) else {
        return Ok(Vec::new());
    };

    Ok(test_action
        .descendants()
        .filter(|n| n.has_tag_name("TestableReference"))
        .filter_map(|testable| {
            testable
                .children()
                .find(|n| n.has_tag_name("BuildableReference"))
        })
        .filter_map(|reference| reference.attribute("BlueprintName"))
        .map(str::to_string)
        .collect())
}

fn normalize(names: &[String]) -> Result<Vec<String>, RunError> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(names.len());

    for target in names {
        let target = target.trim();
        if target.is_empty() {
            return Err(RunError::Configuration(
                "test target names must not be empty".to_string(),
            ));
        }
        if seen.insert(target.to_string()) {
            targets.push(target.to_string());
        } else {
            warn!("Ignoring duplicate test target {target}");
        }
    }

    if targets.is_empty() {
        warn!("No test targets found; nothing will be scheduled");
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SCHEME: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Scheme LastUpgradeVersion = "1150" version = "1.3">
   <BuildAction parallelizeBuildables = "YES">
      <BuildActionEntries>
         <BuildActionEntry buildForTesting = "YES">
            <BuildableReference
               BuildableIdentifier = "primary"
               BlueprintName = "App"
               BuildableName = "App.app"
               ReferencedContainer = "container:App.xcodeproj">
            </BuildableReference>
         </BuildActionEntry>
      </BuildActionEntries>
   </BuildAction>
   <TestAction buildConfiguration = "Debug">
      <Testables>
         <TestableReference skipped = "NO">
            <BuildableReference
               BuildableIdentifier = "primary"
               BlueprintName = "AppTests"
               BuildableName = "AppTests.xctest"
               ReferencedContainer = "container:App.xcodeproj">
            </BuildableReference>
         </TestableReference>
         <TestableReference skipped = "NO">
            <BuildableReference
               BuildableIdentifier = "primary"
               BlueprintName = "AppUITests"
               BuildableName = "AppUITests.xctest"
               ReferencedContainer = "container:App.xcodeproj">
            </BuildableReference>
         </TestableReference>
      </Testables>
   </TestAction>
</Scheme>
"#;

    fn source(items: &[&str]) -> StaticTargets {
        StaticTargets::new(items.iter().map(|s| s.to_string()).collect())
    }

    fn write_scheme(project: &Path, name: &str, xml: &str) {
        let dir = project.join("xcshareddata").join("xcschemes");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{name}.xcscheme")), xml).unwrap();
    }

    #[test]
    fn test_targets_keep_order() {
        let targets = source(&["B", "A", "C"]).test_targets().unwrap();
        assert_eq!(targets, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let targets = source(&["A", "B", "A", " B "]).test_targets().unwrap();
        assert_eq!(targets, vec!["A", "B"]);
    }

    #[test]
    fn test_blank_target_rejected() {
        let err = source(&["A", "  "]).test_targets().unwrap_err();
        assert!(matches!(err, RunError::Configuration(_)));
    }

    #[test]
    fn test_empty_is_allowed() {
        assert!(StaticTargets::default().test_targets().unwrap().is_empty());
    }

    #[test]
    fn test_scheme_testables_in_order() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("App.xcodeproj");
        write_scheme(&project, "App", SCHEME);

        let targets = SchemeTargets::new(&project, "App").test_targets().unwrap();
        assert_eq!(targets, vec!["AppTests", "AppUITests"]);
    }

    #[test]
    fn test_missing_scheme_is_configuration_error() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("App.xcodeproj");
        write_scheme(&project, "App", SCHEME);

        let source = SchemeTargets::new(&project, "Other");
        match source.test_targets() {
            Err(RunError::Configuration(msg)) => assert!(msg.contains("Other")),
            other => panic!("expected configuration error, got {other:?}"),
        }
        assert!(source.path().ends_with("xcshareddata/xcschemes/Other.xcscheme"));
    }

    #[test]
    fn test_scheme_without_test_action() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("App.xcodeproj");
        write_scheme(&project, "App", "<Scheme><BuildAction/></Scheme>");

        let targets = SchemeTargets::new(&project, "App").test_targets().unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_malformed_scheme_rejected() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("App.xcodeproj");
        write_scheme(&project, "App", "<Scheme><TestAction>");

        let err = SchemeTargets::new(&project, "App").test_targets().unwrap_err();
        assert!(matches!(err, RunError::Configuration(_)));
    }
}
