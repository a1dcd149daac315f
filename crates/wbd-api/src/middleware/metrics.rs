// SPDX-License-Identifier: BUSL-1.1
//! # Prometheus Metrics
//!
//! HTTP-level metrics (request counts, latency, errors) are recorded in
//! middleware. Forecast outcomes are counted by the forecast route. Dataset
//! gauges are set on each `/metrics` scrape (pull model), see the metrics
//! handler in `lib.rs`.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use prometheus::{
    core::Collector, Encoder, Gauge, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Routes served by this API. Anything else is labelled `other`.
const KNOWN_PATHS: &[&str] = &[
    "/diseases",
    "/map-data",
    "/v1/dashboard",
    "/v1/forecast",
    "/v1/forecast/targets",
    "/health/liveness",
    "/health/readiness",
    "/metrics",
    "/openapi.json",
];

/// Shared metrics state backed by a Prometheus registry.
#[derive(Clone)]
pub struct ApiMetrics {
    inner: Arc<Inner>,
}

struct Inner {
    registry: Registry,

    // -- HTTP middleware metrics (push model) --
    http_requests_total: IntCounterVec,
    http_request_duration_seconds: HistogramVec,
    http_errors_total: IntCounterVec,

    // -- Forecast outcomes (push model, recorded by the forecast route) --
    forecast_requests_total: IntCounterVec,

    // -- Dataset gauges (pull model, updated on /metrics scrape) --
    dataset_states: Gauge,
    dataset_districts: Gauge,
    dataset_diseases: Gauge,
    forecast_configured: Gauge,
}

impl std::fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiMetrics")
            .field("requests", &self.requests())
            .field("errors", &self.errors())
            .finish()
    }
}

impl ApiMetrics {
    /// Create a new metrics instance with a fresh Prometheus registry.
    pub fn new() -> Self {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("wbd_http_requests_total", "Total HTTP requests"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "wbd_http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
            ]),
            &["method", "path"],
        )
        .expect("metric can be created");

        let http_errors_total = IntCounterVec::new(
            Opts::new("wbd_http_errors_total", "Total HTTP errors (4xx and 5xx)"),
            &["method", "path", "status"],
        )
        .expect("metric can be created");

        let forecast_requests_total = IntCounterVec::new(
            Opts::new(
                "wbd_forecast_requests_total",
                "Forecast requests by outcome (ready, not_found, unavailable, timeout, not_configured)",
            ),
            &["outcome"],
        )
        .expect("metric can be created");

        let dataset_states = Gauge::new("wbd_dataset_states", "States in the loaded dataset")
            .expect("metric can be created");
        let dataset_districts =
            Gauge::new("wbd_dataset_districts", "Districts in the loaded dataset")
                .expect("metric can be created");
        let dataset_diseases = Gauge::new("wbd_dataset_diseases", "Diseases in the loaded dataset")
            .expect("metric can be created");
        let forecast_configured = Gauge::new(
            "wbd_forecast_configured",
            "Whether a predictor is configured (1=yes, 0=no)",
        )
        .expect("metric can be created");

        registry
            .register(Box::new(http_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(http_errors_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(forecast_requests_total.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(dataset_states.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(dataset_districts.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(dataset_diseases.clone()))
            .expect("metric can be registered");
        registry
            .register(Box::new(forecast_configured.clone()))
            .expect("metric can be registered");

        Self {
            inner: Arc::new(Inner {
                registry,
                http_requests_total,
                http_request_duration_seconds,
                http_errors_total,
                forecast_requests_total,
                dataset_states,
                dataset_districts,
                dataset_diseases,
                forecast_configured,
            }),
        }
    }

    /// Total request count across all labels.
    pub fn requests(&self) -> u64 {
        sum_counters(&self.inner.http_requests_total)
    }

    /// Total error count across all labels.
    pub fn errors(&self) -> u64 {
        sum_counters(&self.inner.http_errors_total)
    }

    /// Forecast requests recorded with `outcome`.
    pub fn forecast_outcomes(&self, outcome: &str) -> u64 {
        self.inner
            .forecast_requests_total
            .with_label_values(&[outcome])
            .get()
    }

    /// Record an HTTP request (called by the middleware).
    fn record_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        let status_str = status.to_string();
        self.inner
            .http_requests_total
            .with_label_values(&[method, path, &status_str])
            .inc();

        self.inner
            .http_request_duration_seconds
            .with_label_values(&[method, path])
            .observe(duration_secs);

        if status >= 400 {
            self.inner
                .http_errors_total
                .with_label_values(&[method, path, &status_str])
                .inc();
        }
    }

    /// Count one forecast request.
    pub fn record_forecast(&self, outcome: &str) {
        self.inner
            .forecast_requests_total
            .with_label_values(&[outcome])
            .inc();
    }

    /// Set the dataset gauges.
    pub fn set_dataset_size(&self, states: usize, districts: usize, diseases: usize) {
        self.inner.dataset_states.set(states as f64);
        self.inner.dataset_districts.set(districts as f64);
        self.inner.dataset_diseases.set(diseases as f64);
    }

    pub fn set_forecast_configured(&self, configured: bool) {
        self.inner
            .forecast_configured
            .set(if configured { 1.0 } else { 0.0 });
    }

    /// Gather all metrics and encode to Prometheus text format.
    pub fn gather_and_encode(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| format!("failed to encode metrics: {e}"))?;
        String::from_utf8(buffer)
            .map_err(|e| format!("metrics encoding produced invalid UTF-8: {e}"))
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_counters(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|mf| mf.get_metric())
        .map(|m| m.get_counter().get_value() as u64)
        .sum()
}

/// Collapse unknown paths into one label value.
fn normalize_path(path: &str) -> &'static str {
    KNOWN_PATHS
        .iter()
        .copied()
        .find(|known| *known == path)
        .unwrap_or("other")
}

/// Middleware that records HTTP request metrics via Prometheus.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        let duration = start.elapsed().as_secs_f64();
        let status = response.status().as_u16();
        m.record_request(&method, path, status, duration);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_metrics_new_starts_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
        assert_eq!(m.forecast_outcomes("ready"), 0);
    }

    #[test]
    fn request_and_error_counts_independent() {
        let m = ApiMetrics::new();
        for _ in 0..5 {
            m.record_request("GET", "/diseases", 200, 0.01);
        }
        m.record_request("GET", "/diseases", 404, 0.01);
        m.record_request("POST", "/v1/forecast", 422, 0.05);
        assert_eq!(m.requests(), 7);
        assert_eq!(m.errors(), 2);
    }

    #[test]
    fn forecast_outcomes_are_labelled() {
        let m = ApiMetrics::new();
        m.record_forecast("ready");
        m.record_forecast("unavailable");
        m.record_forecast("unavailable");
        assert_eq!(m.forecast_outcomes("ready"), 1);
        assert_eq!(m.forecast_outcomes("unavailable"), 2);
        assert_eq!(m.forecast_outcomes("timeout"), 0);
    }

    #[test]
    fn unknown_paths_collapse() {
        assert_eq!(normalize_path("/diseases"), "/diseases");
        assert_eq!(normalize_path("/wp-admin/login.php"), "other");
        assert_eq!(normalize_path("/diseases/extra"), "other");
    }

    #[test]
    fn encode_includes_gauges() {
        let m = ApiMetrics::new();
        m.set_dataset_size(8, 33, 4);
        m.set_forecast_configured(false);
        let text = m.gather_and_encode().unwrap();
        assert!(text.contains("wbd_dataset_states 8"));
        assert!(text.contains("wbd_dataset_districts 33"));
        assert!(text.contains("wbd_forecast_configured 0"));
    }
}
