use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for sequence-processing events.
///
/// Keeps the use cases free of any particular output mechanism; the CLI
/// plugs in a `log`-backed implementation, tests plug in the null one.
pub trait PipelineLogger: Send {
    /// Report frame-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named pipeline stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
}

#[derive(Default)]
struct Aggregate {
    sum: f64,
    count: usize,
}

impl Aggregate {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn avg(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// CLI-oriented logger emitting through the `log` crate.
///
/// Progress lines are throttled to every `throttle_frames` frames so long
/// videos don't flood the terminal.
pub struct LogPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, Aggregate>,
    metrics: HashMap<String, Aggregate>,
    start_time: Instant,
    total_frames: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            total_frames: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let frames = self.total_frames;
        let mut lines = Vec::new();

        lines.push(format!("Run summary ({frames} frames, {elapsed_s:.1}s total):"));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let agg = &self.timings[stage];
            lines.push(format!(
                "  {stage:12}: avg {:6.1}ms  total {:7.0}ms",
                agg.avg(),
                agg.sum
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            lines.push(format!("  {name}: avg {:.1}", self.metrics[name].avg()));
        }

        if frames > 0 && elapsed_s > 0.0 {
            lines.push(format!("  Throughput: {:.1} fps", frames as f64 / elapsed_s));
        }

        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_frames = self.total_frames.max(current);
        if total > 0 && (current % self.throttle_frames == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Processing: {current}/{total} frames ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.entry(name.to_string()).or_default().push(value);
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullPipelineLogger;
        logger.progress(1, 10);
        logger.timing("process", 5.0);
        logger.metric("faces", 3.0);
        logger.summary();
    }

    #[test]
    fn test_timing_aggregates_per_stage() {
        let mut logger = LogPipelineLogger::new(10);
        logger.timing("process", 20.0);
        logger.timing("process", 30.0);
        logger.timing("write", 5.0);

        assert_eq!(logger.timings["process"].count, 2);
        assert!((logger.timings["process"].avg() - 25.0).abs() < f64::EPSILON);
        assert_eq!(logger.timings["write"].count, 1);
    }

    #[test]
    fn test_metric_aggregates() {
        let mut logger = LogPipelineLogger::new(10);
        logger.metric("faces", 3.0);
        logger.metric("faces", 4.0);
        assert!((logger.metrics["faces"].avg() - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_includes_stages_and_metrics() {
        let mut logger = LogPipelineLogger::new(10);
        logger.total_frames = 10;
        logger.timing("process", 20.0);
        logger.metric("faces", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Run summary"));
        assert!(summary.contains("process"));
        assert!(summary.contains("faces: avg 2.0"));
    }

    #[test]
    fn test_summary_includes_throughput() {
        let mut logger = LogPipelineLogger::new(10);
        logger.total_frames = 100;
        logger.timing("process", 10.0);
        assert!(logger.summary_string().unwrap().contains("fps"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let logger = LogPipelineLogger::new(10);
        assert!(logger.summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_frame_count() {
        let mut logger = LogPipelineLogger::new(10);
        for i in 1..=20 {
            logger.progress(i, 20);
        }
        assert_eq!(logger.total_frames, 20);
    }

    #[test]
    fn test_throttle_minimum_is_one() {
        let logger = LogPipelineLogger::new(0);
        assert_eq!(logger.throttle_frames, 1);
    }
}
