//! Timing helpers

use std::time::{Duration, Instant};

/// Stopwatch with named laps
#[derive(Debug)]
pub struct Stopwatch {
    start: Instant,
    laps: Vec<(String, Duration)>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            laps: Vec::new(),
        }
    }

    /// Record a lap ending now
    pub fn lap(&mut self, label: impl Into<String>) {
        let elapsed = self.start.elapsed();
        self.laps.push((label.into(), elapsed));
    }

    pub fn total(&self) -> Duration {
        self.start.elapsed()
    }

    /// Duration of each lap, not cumulative
    pub fn lap_times(&self) -> Vec<(String, Duration)> {
        let mut result = Vec::new();
        let mut prev = Duration::ZERO;

        for (label, cumulative) in &self.laps {
            result.push((label.clone(), *cumulative - prev));
            prev = *cumulative;
        }

        result
    }

    /// Duration of the lap named `label` in milliseconds, 0 if absent
    pub fn lap_ms(&self, label: &str) -> u64 {
        self.lap_times()
            .into_iter()
            .find(|(l, _)| l == label)
            .map(|(_, d)| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn format(&self) -> String {
        let mut output = String::new();
        for (label, duration) in self.lap_times() {
            output.push_str(&format!("{}: {}ms\n", label, duration.as_millis()));
        }
        output.push_str(&format!("Total: {}ms", self.total().as_millis()));
        output
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_stopwatch_laps() {
        let mut sw = Stopwatch::new();
        sleep(Duration::from_millis(10));
        sw.lap("build");
        sleep(Duration::from_millis(10));
        sw.lap("tests");

        let laps = sw.lap_times();
        assert_eq!(laps.len(), 2);
        assert!(sw.lap_ms("build") >= 10);
        assert!(sw.lap_ms("tests") >= 10);
        assert_eq!(sw.lap_ms("missing"), 0);
    }

    #[test]
    fn test_stopwatch_format() {
        let mut sw = Stopwatch::default();
        sw.lap("build");
        let text = sw.format();
        assert!(text.starts_with("build: "));
        assert!(text.contains("Total: "));
    }
}
