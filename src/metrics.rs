//! Prometheus metrics.
//!
//! HTTP traffic is recorded by [`metrics_middleware`]; a few business counters
//! are bumped from the services. Set `METRICS_ENABLED=false` to turn all of it
//! off, in which case `/metrics` is not mounted.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn is_metrics_enabled() -> bool {
    *METRICS_ENABLED.get_or_init(|| {
        std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Installs the global Prometheus recorder once and returns its handle.
///
/// Later calls return the same handle, so building several routers in one
/// process (as the integration tests do) is fine.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_metrics_enabled() {
        return Ok(None);
    }

    if let Some(handle) = PROMETHEUS_HANDLE.get() {
        return Ok(Some(handle.clone()));
    }

    let recorder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .build_recorder();

    let handle = recorder.handle();
    if PROMETHEUS_HANDLE.set(handle.clone()).is_ok() {
        // Losing the race means another thread installed it first.
        let _ = metrics::set_global_recorder(recorder);

        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let upkeep_handle = handle.clone();
            runtime.spawn(async move {
                loop {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    upkeep_handle.run_upkeep();
                }
            });
        }
    }

    Ok(PROMETHEUS_HANDLE.get().cloned())
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status)
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);
    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_user_created(role: &str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("users_created_total", "role" => role.to_string()).increment(1);
}

/// `kind` is `login` or `refresh`.
pub fn track_token_issued(kind: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("token_issued_total", "kind" => kind).increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("login_failures_total", "reason" => reason).increment(1);
}
