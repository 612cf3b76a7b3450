// ===============================
// src/metrics.rs
// ===============================
use once_cell::sync::Lazy;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

// Single custom registry (we register everything here)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

// Calls per action & outcome (ok / transport / decode / business / http)
pub static CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("yunxin_calls_total", "YunXin API calls (labels: action, outcome)"),
        &["action", "outcome"],
    )
    .unwrap()
});

// Round-trip latency per action (milliseconds)
pub static CALL_LATENCY: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("yunxin_call_latency_ms", "YunXin call round-trip latency (ms)")
            .buckets(vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 3000.0]),
        &["action"],
    )
    .unwrap()
});

/// Register all metrics to the custom registry. Safe to call more than once.
pub fn init() {
    for m in [
        REGISTRY.register(Box::new(CALLS.clone())),
        REGISTRY.register(Box::new(CALL_LATENCY.clone())),
    ] {
        let _ = m;
    }
}

pub fn record_call(action: &str, outcome: &str, elapsed_ms: f64) {
    CALLS.with_label_values(&[action, outcome]).inc();
    CALL_LATENCY.with_label_values(&[action]).observe(elapsed_ms);
}

// Encode all metrics in Prometheus text format
pub fn encode_metrics() -> Vec<u8> {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buf = Vec::new();
    if encoder.encode(&families, &mut buf).is_err() || buf.is_empty() {
        buf.extend_from_slice(b"# no metrics\n");
    }
    buf
}
