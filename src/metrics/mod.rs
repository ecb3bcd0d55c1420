//! Basic metrics instrumentation for a single run.
//!
//! Provides counters and duration tracking for HTTP requests, people listed
//! and cards fetched. The binaries log a summary when a run finishes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for tracking remote calls.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Number of people records listed
    people_listed_total: Arc<AtomicU64>,

    /// Number of vCards downloaded
    cards_fetched_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            people_listed_total: Arc::new(AtomicU64::new(0)),
            cards_fetched_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_people_listed(&self, count: usize) {
        self.people_listed_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_card_fetched(&self) {
        self.cards_fetched_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            people_listed_total: self.people_listed_total.load(Ordering::Relaxed),
            cards_fetched_total: self.cards_fetched_total.load(Ordering::Relaxed),
        }
    }

    /// Log the summary at debug level.
    pub fn log_summary(&self) {
        let summary = self.summary();
        tracing::debug!(
            http_requests = summary.http_requests_total,
            http_errors = summary.http_errors_total,
            avg_ms = format!("{:.1}", summary.http_duration_avg_ms),
            people_listed = summary.people_listed_total,
            cards_fetched = summary.cards_fetched_total,
            "Run metrics"
        );
    }
}

/// Snapshot of the counters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub people_listed_total: u64,
    pub cards_fetched_total: u64,
}

/// Timer for measuring one HTTP call.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start a new timer.
    pub fn start(metrics: &Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics: metrics.clone(),
        }
    }

    /// Stop the timer, recording the request and whether it failed.
    pub fn finish(self, success: bool) {
        if !success {
            self.metrics.record_http_error();
        }
        self.metrics.record_http_request(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counting() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(300));
        metrics.record_http_error();
        metrics.record_people_listed(25);
        metrics.record_card_fetched();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_errors_total, 1);
        assert_eq!(summary.http_duration_avg_ms, 200.0);
        assert_eq!(summary.people_listed_total, 25);
        assert_eq!(summary.cards_fetched_total, 1);
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let timer = HttpTimer::start(&metrics);
        timer.finish(false);

        assert_eq!(metrics.http_requests_total(), 1);
        assert_eq!(metrics.http_errors_total(), 1);
    }

    #[test]
    fn test_average_with_no_requests() {
        assert_eq!(Metrics::new().http_duration_avg_ms(), 0.0);
    }
}
