//! Prometheus metrics for dashboard-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "dashboard_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Failed dashboard queries by operation.
pub static DATA_FETCH_ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_data_fetch_errors_total",
        "Total number of failed dashboard queries",
        &["operation"]
    )
    .expect("Failed to register data_fetch_errors_total")
});

/// Rows written by the seed loader.
pub static SEED_ROWS_INSERTED: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dashboard_seed_rows_inserted_total",
        "Total number of rows inserted by the seed loader",
        &["table"] // users, customers, invoices, revenue
    )
    .expect("Failed to register seed_rows_inserted_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&DATA_FETCH_ERRORS_TOTAL);
    Lazy::force(&SEED_ROWS_INSERTED);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_metrics_show_up_in_exposition() {
        init_metrics();
        DATA_FETCH_ERRORS_TOTAL
            .with_label_values(&["fetch_revenue"])
            .inc();

        let text = get_metrics();

        assert!(text.contains("dashboard_data_fetch_errors_total"));
        assert!(text.contains("operation=\"fetch_revenue\""));
    }
}
