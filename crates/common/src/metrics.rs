//! Prometheus metrics for the product service (default registry).

use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

pub static PRODUCT_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "product_service_operations_total",
        "Total product service operations by kind",
        &["op"]
    )
    .expect("register product_service_operations_total")
});

pub static PRODUCT_NOT_FOUND_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "product_service_not_found_total",
        "Product operations that targeted a missing id",
        &["op"]
    )
    .expect("register product_service_not_found_total")
});

pub fn record_operation(op: &str) {
    PRODUCT_OPERATIONS_TOTAL.with_label_values(&[op]).inc();
}

pub fn record_not_found(op: &str) {
    PRODUCT_NOT_FOUND_TOTAL.with_label_values(&[op]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
