use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Counters and timings of one merge invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeMetrics {
    pub total_duration: Duration,

    /// Duration of each run-through
    pub run_durations: BTreeMap<u8, Duration>,

    /// Records queued for a later run, by the run that queued them
    pub requeued_per_run: BTreeMap<u8, usize>,

    pub input_count: usize,
    pub provider_count: usize,
    pub golden_record_count: usize,

    pub merged_via_lock: usize,
    pub merged_via_probability: usize,
    /// Records whose source already belonged to a golden record
    pub merged_via_source: usize,
    pub created: usize,
}

impl MergeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merged(&self) -> usize {
        self.merged_via_lock + self.merged_via_probability + self.merged_via_source
    }

    /// Percentage of input records that were folded into an existing golden record
    pub fn merge_rate(&self) -> f32 {
        if self.input_count == 0 {
            return 0.0;
        }

        (self.merged() as f32 / self.input_count as f32) * 100.0
    }

    pub fn record_requeue(&mut self, run: u8) {
        *self.requeued_per_run.entry(run).or_default() += 1;
    }

    pub fn report(&self) -> String {
        let mut lines = vec![
            "=== Merge Metrics ===".to_string(),
            format!("Total Duration: {}ms", self.total_duration.as_millis()),
            format!("Input Count: {}", self.input_count),
            format!("Providers: {}", self.provider_count),
            format!("Golden Records: {}", self.golden_record_count),
            format!("Merge Rate: {:.1}%", self.merge_rate()),
            format!("Merged via Lock: {}", self.merged_via_lock),
            format!("Merged via Probability: {}", self.merged_via_probability),
            format!("Merged via Source: {}", self.merged_via_source),
            format!("Created: {}", self.created),
            "".to_string(),
            "Runs:".to_string(),
        ];

        for (run, duration) in &self.run_durations {
            lines.push(format!(
                "  Run {}: {}ms, {} requeued",
                run,
                duration.as_millis(),
                self.requeued_per_run.get(run).copied().unwrap_or(0)
            ));
        }

        lines.join("\n")
    }
}

/// Times one run-through
pub struct RunTimer {
    run: u8,
    start: Instant,
}

impl RunTimer {
    pub fn start(run: u8) -> Self {
        Self {
            run,
            start: Instant::now(),
        }
    }

    /// Adds to the run's duration, a run may be timed in several slices
    pub fn stop(self, metrics: &mut MergeMetrics) -> Duration {
        let duration = self.start.elapsed();
        *metrics.run_durations.entry(self.run).or_default() += duration;
        duration
    }
}
