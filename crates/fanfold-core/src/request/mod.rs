//! Module: request
//! Responsibility: request nodes pairing one source with ordered consumers,
//! and their memoized single-pass evaluation.
//! Does not own: aggregation semantics (see `consumer`).
//! Boundary: public evaluation surface; slots are typed per position.

mod driver;
mod dynamic;
mod fluent;
mod set;
mod state;

#[cfg(test)]
mod tests;

use crate::{
    config::EvaluationConfig,
    consumer::Consumer,
    error::AggregateError,
    obs::sink::{self, MetricsEvent},
};
use std::fmt;

pub use dynamic::{DynRequest, DynResults, Slot};
pub use fluent::AggregateSource;
pub use set::{Append, ConsumerSet};
pub use state::Phase;

use state::NodeState;

/// Consumer tuple produced by appending `N` to `C`.
pub type Extended<C, N> = <C as Append<N>>::Extended;

///
/// Request
///
/// Immutable, arity-typed request node. Adding a consumer consumes the node
/// and returns a larger one; slot `i` of the result tuple is the output of
/// the `i`-th consumer added.
///
/// Nothing is read from the source until the first call to `evaluate`,
/// `results`, or `into_results`. That call enumerates the source exactly
/// once; every later read returns the cached tuple (or the cached failure).
///

pub struct Request<S, C>
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    state: NodeState<S, C, C::Output>,
    arity: usize,
    config: EvaluationConfig,
}

impl<S, C0> Request<S, (C0,)>
where
    S: IntoIterator,
    C0: Consumer<S::Item>,
{
    /// Wrap a source and its first consumer.
    pub fn new(source: S, consumer: C0) -> Self {
        Self {
            state: NodeState::Pending {
                source,
                consumers: (consumer,),
            },
            arity: 1,
            config: EvaluationConfig::default(),
        }
    }

    /// Wrap a source and its first consumer, rejecting absent arguments.
    pub fn try_new(source: Option<S>, consumer: Option<C0>) -> Result<Self, AggregateError> {
        let source =
            source.ok_or_else(|| AggregateError::invalid_request("request source is required"))?;
        let consumer = consumer
            .ok_or_else(|| AggregateError::invalid_request("request consumer is required"))?;

        Ok(Self::new(source, consumer))
    }
}

impl<S, C> Request<S, C>
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    /// Return a node holding the same source and consumers plus `consumer`
    /// in the next slot.
    ///
    /// Extending a node that was already evaluated yields a node whose
    /// evaluation fails with an invalid-argument error; its source is gone.
    pub fn add<N>(self, consumer: N) -> Request<S, Extended<C, N>>
    where
        N: Consumer<S::Item>,
        C: Append<N>,
        Extended<C, N>: ConsumerSet<S::Item>,
    {
        let Self {
            state,
            arity,
            config,
        } = self;

        let state = match state {
            NodeState::Pending { source, consumers } => NodeState::Pending {
                source,
                consumers: consumers.append(consumer),
            },
            NodeState::Evaluating | NodeState::Evaluated(_) => {
                NodeState::Evaluated(Err(AggregateError::invalid_request(
                    "cannot add a consumer to a request that was already evaluated",
                )))
            }
        };

        Request {
            state,
            arity: arity.saturating_add(1),
            config,
        }
    }

    /// `add`, rejecting an absent consumer.
    pub fn try_add<N>(
        self,
        consumer: Option<N>,
    ) -> Result<Request<S, Extended<C, N>>, AggregateError>
    where
        N: Consumer<S::Item>,
        C: Append<N>,
        Extended<C, N>: ConsumerSet<S::Item>,
    {
        let consumer = consumer
            .ok_or_else(|| AggregateError::invalid_request("request consumer is required"))?;

        Ok(self.add(consumer))
    }

    /// Replace the evaluation policy for this node.
    #[must_use]
    pub const fn with_config(mut self, config: EvaluationConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Number of consumer slots.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub const fn is_evaluated(&self) -> bool {
        matches!(self.state.phase(), Phase::Evaluated)
    }

    /// Evaluate on first call, then return the cached result tuple.
    ///
    /// A failed evaluation is cached too; later calls return the same error
    /// without touching the source again.
    pub fn evaluate(&mut self) -> Result<&C::Output, AggregateError> {
        if self.is_evaluated() && self.config.record_metrics() {
            sink::record(MetricsEvent::CachedRead { arity: self.arity });
        }
        driver::settle(&mut self.state, &self.config);

        self.state.outcome()
    }

    /// `evaluate`, returning an owned copy of the tuple.
    pub fn results(&mut self) -> Result<C::Output, AggregateError>
    where
        C::Output: Clone,
    {
        self.evaluate().cloned()
    }

    /// Evaluate (if needed) and take the result tuple.
    pub fn into_results(self) -> Result<C::Output, AggregateError> {
        let Self {
            mut state, config, ..
        } = self;
        driver::settle(&mut state, &config);

        state.into_outcome()
    }
}

impl<S, C> fmt::Debug for Request<S, C>
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("arity", &self.arity)
            .field("phase", &self.phase())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
