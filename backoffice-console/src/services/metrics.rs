use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static BACKEND_FAILURES_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static MALFORMED_AMOUNTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Install the HTTP metrics recorder and register console counters.
/// Safe to call more than once; later calls are ignored.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
    }

    let registry = Registry::new();

    let backend_failures = IntCounterVec::new(
        Opts::new(
            "console_backend_failures_total",
            "Failed backend calls by resource and operation",
        ),
        &["resource", "operation"],
    )
    .expect("metric can be created");

    let malformed_amounts = IntCounterVec::new(
        Opts::new(
            "console_malformed_amounts_total",
            "Records whose amount was missing or unparseable and counted as zero",
        ),
        &["kind"],
    )
    .expect("metric can be created");

    registry
        .register(Box::new(backend_failures.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(malformed_amounts.clone()))
        .expect("collector can be registered");

    let _ = REGISTRY.set(registry);
    let _ = BACKEND_FAILURES_TOTAL.set(backend_failures);
    let _ = MALFORMED_AMOUNTS_TOTAL.set(malformed_amounts);
}

pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default();

    if let Some(registry) = REGISTRY.get() {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
        }
        output.push_str(&String::from_utf8_lossy(&buffer));
    }

    output
}

pub fn record_backend_failure(resource: &str, operation: &str) {
    if let Some(counter) = BACKEND_FAILURES_TOTAL.get() {
        counter.with_label_values(&[resource, operation]).inc();
    }
}

pub fn record_malformed_amounts(kind: &str, count: u64) {
    if count == 0 {
        return;
    }
    if let Some(counter) = MALFORMED_AMOUNTS_TOTAL.get() {
        counter.with_label_values(&[kind]).inc_by(count);
    }
}
