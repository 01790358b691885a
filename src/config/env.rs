//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;
use tracing::warn;

/// Environment variable prefix
const ENV_PREFIX: &str = "XCODE_PARALLEL_TEST";

/// Configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Config file from XCODE_PARALLEL_TEST_CONFIG
    pub config_file: Option<String>,
    /// Build directory from XCODE_PARALLEL_TEST_BUILD_DIR
    pub build_dir: Option<String>,
    /// Per-job timeout from XCODE_PARALLEL_TEST_TIMEOUT
    pub timeout: Option<u64>,
    /// Batching from XCODE_PARALLEL_TEST_BATCHING
    pub batching: Option<bool>,
    /// Log level from XCODE_PARALLEL_TEST_LOG
    pub log: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            config_file: get("CONFIG"),
            build_dir: get("BUILD_DIR"),
            timeout: get("TIMEOUT").and_then(|v| parsed("TIMEOUT", &v, v.parse().ok())),
            batching: get("BATCHING").and_then(|v| parsed("BATCHING", &v, parse_bool(&v))),
            log: get("LOG"),
        }
    }
}

/// Pass `value` through, warning when `raw` could not be parsed
fn parsed<T>(name: &str, raw: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        warn!("Ignoring invalid {ENV_PREFIX}_{name} value '{raw}'");
    }
    value
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> EnvConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_env_values() {
        let env = env_from(&[
            ("XCODE_PARALLEL_TEST_CONFIG", "ci.yml"),
            ("XCODE_PARALLEL_TEST_TIMEOUT", "300"),
            ("XCODE_PARALLEL_TEST_BATCHING", "yes"),
            ("XCODE_PARALLEL_TEST_LOG", "debug"),
        ]);

        assert_eq!(env.config_file.as_deref(), Some("ci.yml"));
        assert_eq!(env.timeout, Some(300));
        assert_eq!(env.batching, Some(true));
        assert_eq!(env.log.as_deref(), Some("debug"));
        assert_eq!(env.build_dir, None);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let env = env_from(&[
            ("XCODE_PARALLEL_TEST_TIMEOUT", "soon"),
            ("XCODE_PARALLEL_TEST_BATCHING", "maybe"),
            ("XCODE_PARALLEL_TEST_BUILD_DIR", "  "),
        ]);

        assert_eq!(env.timeout, None);
        assert_eq!(env.batching, None);
        assert_eq!(env.build_dir, None);
    }

    #[test]
    fn test_parsed_keeps_valid_values() {
        assert_eq!(parsed("TIMEOUT", "30", "30".parse::<u64>().ok()), Some(30));
        assert_eq!(parsed("TIMEOUT", "30s", "30s".parse::<u64>().ok()), None);
        assert_eq!(parsed("BATCHING", "on", parse_bool("on")), Some(true));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
