//! Logging utilities
//!
//! Installs the tracing subscriber used by the command-line front end.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    /// `--verbose` wins, then an explicit level, then info
    pub fn resolve(verbose: bool, requested: Option<&str>) -> Self {
        if verbose {
            return LogLevel::Debug;
        }
        requested
            .and_then(LogLevel::from_str)
            .unwrap_or(LogLevel::Info)
    }

    fn directive(self) -> String {
        format!("xcode_parallel_test={}", self.to_tracing_level())
    }
}

/// Initialize the logger; `RUST_LOG` overrides `level` when set
pub fn init_logger(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!(LogLevel::from_str("info"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_str("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str(" warning "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str("unknown"), None);
    }

    #[test]
    fn test_resolve_level() {
        assert_eq!(LogLevel::resolve(true, Some("error")), LogLevel::Debug);
        assert_eq!(LogLevel::resolve(false, Some("error")), LogLevel::Error);
        assert_eq!(LogLevel::resolve(false, Some("bogus")), LogLevel::Info);
        assert_eq!(LogLevel::resolve(false, None), LogLevel::Info);
    }

    #[test]
    fn test_directive() {
        assert_eq!(LogLevel::Warn.directive(), "xcode_parallel_test=WARN");
        assert_eq!(LogLevel::Trace.to_tracing_level(), Level::TRACE);
    }
}
