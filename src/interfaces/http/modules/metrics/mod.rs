//! `GET /metrics` and the per-request counters behind it

pub mod handlers;
pub mod middleware;

pub use handlers::{prometheus_metrics, MetricsState, PROMETHEUS_CONTENT_TYPE};
pub use middleware::http_metrics_middleware;
