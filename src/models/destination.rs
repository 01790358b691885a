//! Destination identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// One execution environment, e.g. `platform=iOS Simulator,name=iPhone 15`
///
/// Opaque to the scheduler; only the external tool interprets it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(spec: &str) -> Self {
        Self::new(spec)
    }
}

impl From<String> for Destination {
    fn from(spec: String) -> Self {
        Self(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_display() {
        let dest = Destination::new("platform=iOS Simulator,name=iPhone 15");
        assert_eq!(dest.to_string(), "platform=iOS Simulator,name=iPhone 15");
        assert_eq!(dest.as_str(), dest.to_string());
    }

    #[test]
    fn test_destination_serde_transparent() {
        let dests: Vec<Destination> = serde_yaml::from_str("- A\n- B\n").unwrap();
        assert_eq!(dests, vec![Destination::from("A"), Destination::from("B")]);
    }
}
