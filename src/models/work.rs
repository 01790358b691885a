//! Units of scheduled work

use std::fmt;

/// The targets one job runs against one destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkUnit {
    /// One test target per job
    Single { target: String },

    /// A contiguous group of targets, numbered in plan order
    Batch { index: usize, targets: Vec<String> },
}

impl WorkUnit {
    pub fn targets(&self) -> &[String] {
        match self {
            WorkUnit::Single { target } => std::slice::from_ref(target),
            WorkUnit::Batch { targets, .. } => targets,
        }
    }

    /// File name stem for this job's log, unique within a run
    pub fn log_stem(&self) -> String {
        match self {
            WorkUnit::Single { target } => format!("test-{}", sanitize(target)),
            WorkUnit::Batch { index, .. } => format!("test-{index}"),
        }
    }
}

impl fmt::Display for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkUnit::Single { target } => f.write_str(target),
            WorkUnit::Batch { index, targets } => {
                write!(f, "batch {} ({} targets)", index, targets.len())
            }
        }
    }
}

/// Percent-escape path separators, whitespace and `%` itself so distinct
/// targets never share a log file
fn sanitize(target: &str) -> String {
    let mut out = String::with_capacity(target.len());
    for c in target.chars() {
        if matches!(c, '/' | '\\' | ':' | '%') || c.is_whitespace() {
            let mut buf = [0; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}
