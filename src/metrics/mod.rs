//! Basic metrics instrumentation for tracking performance.
//!
//! Provides counters and duration tracking for backend HTTP requests and for
//! SMS dispatch attempts per channel.

use crate::models::ChannelKind;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector shared by the client and the dispatcher.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Destinations a dispatch was started for
    dispatch_attempts_total: Arc<AtomicU64>,

    /// Dispatches that ended in success on any channel
    dispatch_successes_total: Arc<AtomicU64>,

    /// Dispatches that failed on every channel
    dispatch_failures_total: Arc<AtomicU64>,

    /// Successes carried by the native channel
    native_successes_total: Arc<AtomicU64>,

    /// Successes carried by the messaging-app channel
    app_intent_successes_total: Arc<AtomicU64>,

    /// Native attempts that failed and fell back to the messaging app
    fallbacks_total: Arc<AtomicU64>,
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
            dispatch_attempts_total: Arc::new(AtomicU64::new(0)),
            dispatch_successes_total: Arc::new(AtomicU64::new(0)),
            dispatch_failures_total: Arc::new(AtomicU64::new(0)),
            native_successes_total: Arc::new(AtomicU64::new(0)),
            app_intent_successes_total: Arc::new(AtomicU64::new(0)),
            fallbacks_total: Arc::new(AtomicU64::new(0)),
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

    /// Record the start of a dispatch to one destination.
    pub fn record_dispatch_attempt(&self) {
        self.dispatch_attempts_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the channel that carried a successful dispatch.
    pub fn record_dispatch_success(&self, channel: ChannelKind) {
        self.dispatch_successes_total.fetch_add(1, Ordering::Relaxed);
        match channel {
            ChannelKind::Native => {
                self.native_successes_total.fetch_add(1, Ordering::Relaxed);
            }
            ChannelKind::AppIntent => {
                self.app_intent_successes_total
                    .fetch_add(1, Ordering::Relaxed);
            }
            ChannelKind::None => {}
        }
    }

    /// Record a dispatch that no channel could deliver.
    pub fn record_dispatch_failure(&self) {
        self.dispatch_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fallback from the native channel to the messaging app.
    pub fn record_fallback(&self) {
        self.fallbacks_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total HTTP requests.
    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP errors.
    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get total HTTP duration in milliseconds.
    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
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

    pub fn dispatch_attempts_total(&self) -> u64 {
        self.dispatch_attempts_total.load(Ordering::Relaxed)
    }

    pub fn dispatch_successes_total(&self) -> u64 {
        self.dispatch_successes_total.load(Ordering::Relaxed)
    }

    pub fn dispatch_failures_total(&self) -> u64 {
        self.dispatch_failures_total.load(Ordering::Relaxed)
    }

    pub fn native_successes_total(&self) -> u64 {
        self.native_successes_total.load(Ordering::Relaxed)
    }

    pub fn app_intent_successes_total(&self) -> u64 {
        self.app_intent_successes_total.load(Ordering::Relaxed)
    }

    pub fn fallbacks_total(&self) -> u64 {
        self.fallbacks_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        for counter in [
            &self.http_requests_total,
            &self.http_errors_total,
            &self.http_duration_total_ms,
            &self.dispatch_attempts_total,
            &self.dispatch_successes_total,
            &self.dispatch_failures_total,
            &self.native_successes_total,
            &self.app_intent_successes_total,
            &self.fallbacks_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            dispatch_attempts_total: self.dispatch_attempts_total(),
            dispatch_successes_total: self.dispatch_successes_total(),
            dispatch_failures_total: self.dispatch_failures_total(),
            native_successes_total: self.native_successes_total(),
            app_intent_successes_total: self.app_intent_successes_total(),
            fallbacks_total: self.fallbacks_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub dispatch_attempts_total: u64,
    pub dispatch_successes_total: u64,
    pub dispatch_failures_total: u64,
    pub native_successes_total: u64,
    pub app_intent_successes_total: u64,
    pub fallbacks_total: u64,
}

/// Helper for timing HTTP requests.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        self.metrics.record_http_error();
    }
}
