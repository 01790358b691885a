//! Output formatters for run summaries
//!
//! Provides table, JSON, and one-line summary formats.

use serde::Serialize;

use crate::models::{Destination, RunSummary, WorkUnit};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// A job plan as rendered in JSON
#[derive(Serialize)]
struct PlanView<'a> {
    batching: bool,
    destinations: &'a [Destination],
    jobs: Vec<&'a [String]>,
}

/// Summary formatter
pub struct SummaryFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl SummaryFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a finished run
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn status(&self, success: bool) -> &'static str {
        match (success, self.colorize) {
            (true, true) => "\x1b[32m✓ PASSED\x1b[0m",
            (false, true) => "\x1b[31m✗ FAILED\x1b[0m",
            (true, false) => "✓ PASSED",
            (false, false) => "✗ FAILED",
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mode = if summary.batching { "batched" } else { "per target" };
        let mut output = String::new();

        output.push_str("\n══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!("  Scheme {}  {}\n", summary.scheme, self.status(summary.success)));
        output.push_str("──────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Destinations: {:>6}\n", summary.destinations));
        output.push_str(&format!("  Targets:      {:>6}\n", summary.targets));
        output.push_str(&format!("  Jobs:         {:>6}  ({mode})\n", summary.jobs));
        output.push_str(&format!("  Passed:       {:>6}\n", summary.passed_jobs()));
        output.push_str(&format!("  Failed:       {:>6}\n", summary.failed_jobs));
        output.push_str("──────────────────────────────────────────────────────────────\n");
        output.push_str(&format!("  Build:        {:>6}ms\n", summary.build_ms));
        output.push_str(&format!("  Tests:        {:>6}ms\n", summary.tests_ms));
        output.push_str(&format!("  Total:        {:>6}ms\n", summary.total_ms()));
        output.push_str("══════════════════════════════════════════════════════════════\n");

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {} - {}/{} jobs passed on {} destinations in {}ms",
            summary.scheme,
            self.status(summary.success),
            summary.passed_jobs(),
            summary.jobs,
            summary.destinations,
            summary.total_ms()
        )
    }

    /// Format the jobs a run would schedule
    pub fn format_plan(
        &self,
        destinations: &[Destination],
        units: &[WorkUnit],
        batching: bool,
    ) -> String {
        let view = PlanView {
            batching,
            destinations,
            jobs: units.iter().map(WorkUnit::targets).collect(),
        };

        match self.format {
            OutputFormat::Json => serde_json::to_string(&view).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(&view).unwrap_or_default(),
            OutputFormat::Summary => format!(
                "{} jobs on {} destinations",
                units.len(),
                destinations.len()
            ),
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!("\nDestinations ({}):\n", destinations.len()));
                for destination in destinations {
                    output.push_str(&format!("  - {destination}\n"));
                }
                output.push_str(&format!("\nJobs ({}):\n", units.len()));
                for (number, unit) in units.iter().enumerate() {
                    output.push_str(&format!(
                        "  {:3}. {:<30} {}\n",
                        number + 1,
                        unit.log_stem(),
                        unit.targets().join(", ")
                    ));
                }
                output
            }
        }
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}
