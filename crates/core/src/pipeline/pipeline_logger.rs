use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for scheduler events.
///
/// Keeps tick statistics out of the data path: nothing recorded here feeds
/// back into detection, so callers can swap or drop the logger freely.
pub trait PipelineLogger: Send {
    /// Report that a tick finished.
    fn tick(&mut self, frame_index: usize);

    /// Record how long a named stage took for one tick.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. detection counts).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn tick(&mut self, _frame_index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Running aggregate of one stage timing or metric. Constant size no matter
/// how many samples were recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SampleStats {
    pub count: u64,
    pub sum: f64,
    pub max: f64,
}

impl SampleStats {
    fn record(&mut self, value: f64) {
        if self.count == 0 || value > self.max {
            self.max = value;
        }
        self.count += 1;
        self.sum += value;
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Logger backed by the `log` facade that keeps per-stage timings and
/// metrics for an end-of-run report.
///
/// Tick progress is throttled to every `throttle_ticks` ticks so a 60 Hz
/// loop does not flood the log.
pub struct LogPipelineLogger {
    throttle_ticks: usize,
    timings: HashMap<String, SampleStats>,
    metrics: HashMap<String, SampleStats>,
    start_time: Instant,
    ticks: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle_ticks: usize) -> Self {
        Self {
            throttle_ticks: throttle_ticks.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let ticks = self.ticks;
        let mut lines = vec![format!(
            "Pipeline summary ({ticks} ticks, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let stats = &self.timings[stage];
            let (avg_ms, worst_ms, total_ms) = (stats.mean(), stats.max, stats.sum);
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:6.2}ms  max {worst_ms:6.2}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", self.metrics[name].mean()));
        }

        if ticks > 0 && elapsed_ms > 0.0 {
            let rate = ticks as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {rate:.1} ticks/s"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<SampleStats> {
        self.timings.get(stage).copied()
    }

    pub fn metrics_for(&self, name: &str) -> Option<SampleStats> {
        self.metrics.get(name).copied()
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(60)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn tick(&mut self, frame_index: usize) {
        self.ticks += 1;
        if self.ticks % self.throttle_ticks == 0 {
            log::info!("Processed {} ticks (frame {frame_index})", self.ticks);
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.tick(1);
        logger.timing("classify", 5.0);
        logger.metric("raw_detections", 3.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = LogPipelineLogger::new(10);
        logger.timing("classify", 20.0);
        logger.timing("classify", 30.0);
        logger.timing("reduce", 1.5);

        let classify = logger.timings_for("classify").unwrap();
        assert_eq!(classify.count, 2);
        assert_relative_eq!(classify.sum, 50.0);
        assert_relative_eq!(classify.max, 30.0);
        assert_eq!(logger.timings_for("reduce").unwrap().count, 1);
        assert!(logger.timings_for("emit").is_none());
    }

    #[test]
    fn test_metric_records_values() {
        let mut logger = LogPipelineLogger::new(10);
        logger.metric("merged_detections", 3.0);
        logger.metric("merged_detections", 4.0);

        let stats = logger.metrics_for("merged_detections").unwrap();
        assert_relative_eq!(stats.mean(), 3.5);
    }

    #[test]
    fn test_summary_includes_stages_and_metrics() {
        let mut logger = LogPipelineLogger::new(10);
        logger.tick(0);
        logger.timing("classify", 20.0);
        logger.timing("aggregate", 0.1);
        logger.metric("emitted_detections", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Pipeline summary (1 ticks"));
        assert!(summary.contains("classify"));
        assert!(summary.contains("aggregate"));
        assert!(summary.contains("emitted_detections: avg 2.0"));
        assert!(summary.contains("ticks/s"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = LogPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_tick_counts() {
        let mut logger = LogPipelineLogger::new(7);
        for i in 0..20 {
            logger.tick(i);
        }
        assert_eq!(logger.ticks(), 20);
    }

    #[test]
    fn test_default_throttle() {
        let logger = LogPipelineLogger::default();
        assert_eq!(logger.throttle_ticks, 60);
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        assert_relative_eq!(SampleStats::default().mean(), 0.0);
    }

    #[test]
    fn test_max_tracks_negative_samples() {
        let mut stats = SampleStats::default();
        stats.record(-3.0);
        stats.record(-5.0);
        assert_relative_eq!(stats.max, -3.0);
    }

    #[test]
    fn test_retained_state_is_bounded_over_long_runs() {
        let mut logger = LogPipelineLogger::default();
        for i in 0..100_000 {
            logger.timing("classify", 2.0);
            logger.metric("raw_detections", 1.0);
            logger.tick(i);
        }

        assert_eq!(logger.timings.len(), 1);
        assert_eq!(logger.metrics.len(), 1);
        let classify = logger.timings_for("classify").unwrap();
        assert_eq!(classify.count, 100_000);
        assert_relative_eq!(classify.mean(), 2.0);
    }
}
