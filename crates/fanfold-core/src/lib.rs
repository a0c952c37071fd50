//! Core runtime for Fanfold: the consumer contract, built-in aggregation
//! kinds, request nodes, and the single-pass fan-out driver.
//!
//! A request pairs one source with an ordered tuple of consumers. Evaluating
//! it enumerates the source exactly once, feeds every element to every
//! consumer in slot order, and returns a tuple of results that matches the
//! order in which consumers were added.
#![warn(unreachable_pub)]

pub mod config;
pub mod consumer;
pub mod error;
pub mod factory;
pub mod obs;
pub mod request;

///
/// CONSTANTS
///

/// Maximum number of consumers a statically-typed request can hold.
///
/// Adding a consumer to a request that already holds this many is a
/// compile-time error. `DynRequest` has no such cap.
pub const MAX_ARITY: usize = 16;

///
/// Prelude
///
/// Prelude contains the request vocabulary and the consumer contract.
/// Concrete consumer types stay in `consumer`.
///

pub mod prelude {
    pub use crate::{
        config::EvaluationConfig,
        consumer::{AggregateKind, Consumer, ConsumerExt as _, Numeric},
        error::{AggregateError, ErrorClass},
        factory::ConsumerFactory,
        request::{AggregateSource as _, DynRequest, DynResults, Phase, Request, Slot},
    };
}
