//! Observability: evaluation telemetry (metrics) and sink abstractions.
//!
//! This module does not touch sources or consumers directly.
//! The fan-out driver reports through `sink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, KindSummary};
pub use sink::{
    EvalOutcome, MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink,
};
