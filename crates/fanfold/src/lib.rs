//! ## Crate layout
//! - `core`: consumer contract, built-in aggregation kinds, request nodes,
//!   evaluation config, errors, and observability.
//!
//! The `prelude` module carries everything needed to build and evaluate a
//! request; concrete consumer types live under `consumer`.

pub use fanfold_core as core;

pub use fanfold_core::{MAX_ARITY, consumer, error::AggregateError, factory::ConsumerFactory};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        config::EvaluationConfig,
        consumer::{AggregateKind, Consumer, ConsumerExt as _, Numeric},
        error::{AggregateError, ErrorClass},
        factory::ConsumerFactory,
        obs::{MetricsEvent, MetricsSink, metrics_report, with_metrics_sink},
        request::{AggregateSource as _, DynRequest, DynResults, Phase, Request, Slot},
    };
}
