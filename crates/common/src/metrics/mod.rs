//! Metrics and observability utilities
//!
//! Prometheus-style metrics via the `metrics` facade. Without an installed
//! recorder every call here is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all WikiQuiz metrics
pub const METRICS_PREFIX: &str = "wikiquiz";

/// Histogram buckets for scrape and generate latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.010,  // 10ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        format!("{}_quizzes_generated_total", METRICS_PREFIX),
        Unit::Count,
        "Quizzes generated and stored"
    );

    describe_counter!(
        format!("{}_generation_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Failed /generate pipelines, by error code"
    );

    describe_histogram!(
        format!("{}_generation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "End-to-end generate pipeline latency in seconds"
    );

    describe_histogram!(
        format!("{}_scrape_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Page fetch latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Record one page fetch
pub fn record_scrape(duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    histogram!(
        format!("{}_scrape_duration_seconds", METRICS_PREFIX),
        "status" => status
    )
    .record(duration_secs);
}

/// Record a finished generate pipeline
pub fn record_generation(duration_secs: f64, generator: &str) {
    counter!(
        format!("{}_quizzes_generated_total", METRICS_PREFIX),
        "generator" => generator.to_string()
    )
    .increment(1);

    histogram!(format!("{}_generation_duration_seconds", METRICS_PREFIX))
        .record(duration_secs);
}

/// Record a failed generate pipeline
pub fn record_generation_error(code: &str) {
    counter!(
        format!("{}_generation_errors_total", METRICS_PREFIX),
        "code" => code.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_recording_without_recorder() {
        let metrics = RequestMetrics::start("POST", "/generate");
        metrics.finish(200);
        record_scrape(0.2, true);
        record_generation(0.3, "template");
        record_generation_error("FETCH_ERROR");
    }
}
