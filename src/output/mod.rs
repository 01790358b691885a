//! Output formatting module
//!
//! Renders run summaries and job plans for the terminal.

mod formatter;

pub use formatter::{OutputFormat, SummaryFormatter};
