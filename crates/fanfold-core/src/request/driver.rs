//! Module: request::driver
//! Responsibility: the single-pass fan-out over one source.
//! Does not own: consumer semantics or result accessors.
//! Boundary: called only from request nodes while they are pending.

use crate::{
    config::EvaluationConfig,
    error::AggregateError,
    obs::sink::{self, EvalOutcome, MetricsEvent, Span},
    request::{set::ConsumerSet, state::NodeState},
};

/// Run the pass for a pending node and cache its outcome.
///
/// Settled nodes are left untouched. A pass that unwinds leaves the node in
/// `Evaluating`, which later reads report as interrupted.
pub(super) fn settle<S, C>(state: &mut NodeState<S, C, C::Output>, config: &EvaluationConfig)
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    match std::mem::replace(state, NodeState::Evaluating) {
        NodeState::Pending { source, consumers } => {
            *state = NodeState::Evaluated(drive(source, consumers, config));
        }
        settled => *state = settled,
    }
}

/// Enumerate `source` once, feeding every element to every slot before
/// advancing, then finalize the slots in order.
pub(super) fn drive<S, C>(
    source: S,
    mut consumers: C,
    config: &EvaluationConfig,
) -> Result<C::Output, AggregateError>
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    let record_metrics = config.record_metrics();
    let limit = config.element_limit();
    let mut span = Span::new(consumers.arity(), record_metrics);
    let mut elements: u64 = 0;

    for element in source {
        if elements >= limit {
            let err = AggregateError::limit_exceeded(elements.saturating_add(1), limit);
            span.set_outcome(EvalOutcome::Failed(err.class));

            return Err(err);
        }
        elements = elements.saturating_add(1);
        span.set_elements(elements);

        consumers.accept_all(&element);
    }

    let result = consumers.finish_all();
    match &result {
        Ok(_) => span.set_outcome(EvalOutcome::Completed),
        Err(err) => {
            if record_metrics {
                sink::record(MetricsEvent::ConsumerFailed {
                    kind: err.kind,
                    class: err.class,
                    slot: err.slot,
                });
            }
            span.set_outcome(EvalOutcome::Failed(err.class));
        }
    }

    result
}
