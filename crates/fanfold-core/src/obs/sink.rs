//! Metrics sink boundary.
//!
//! Request and driver logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
//!
//! This module is the only allowed bridge between evaluation logic
//! and the thread-local metrics state.
use crate::{consumer::AggregateKind, error::ErrorClass, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// EvalOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvalOutcome {
    Completed,
    Failed(ErrorClass),
    Interrupted,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    EvalStart {
        arity: usize,
    },
    EvalFinish {
        arity: usize,
        elements: u64,
        outcome: EvalOutcome,
    },
    CachedRead {
        arity: usize,
    },
    ConsumerFailed {
        kind: Option<AggregateKind>,
        class: ErrorClass,
        slot: Option<usize>,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default thread-local sink that writes into the metrics counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::EvalStart { arity } => {
                metrics::with_state_mut(|m| {
                    m.ops.evaluations = m.ops.evaluations.saturating_add(1);
                    let arity = u64::try_from(arity).unwrap_or(u64::MAX);
                    m.ops.max_arity = m.ops.max_arity.max(arity);
                });
            }

            MetricsEvent::EvalFinish {
                elements, outcome, ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.elements_observed = m.ops.elements_observed.saturating_add(elements);
                    if outcome != EvalOutcome::Completed {
                        m.ops.failed_evaluations = m.ops.failed_evaluations.saturating_add(1);
                    }
                });
            }

            MetricsEvent::CachedRead { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.cached_reads = m.ops.cached_reads.saturating_add(1);
                });
            }

            MetricsEvent::ConsumerFailed { kind, class, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.consumer_failures = m.ops.consumer_failures.saturating_add(1);

                    let Some(kind) = kind else {
                        return;
                    };
                    let entry = m.kinds.entry(kind.to_string()).or_default();
                    entry.failures = entry.failures.saturating_add(1);
                    match class {
                        ErrorClass::EmptySequence => {
                            entry.empty_sequence = entry.empty_sequence.saturating_add(1);
                        }
                        ErrorClass::IncomparableKey => {
                            entry.incomparable_key = entry.incomparable_key.saturating_add(1);
                        }
                        ErrorClass::Overflow => {
                            entry.overflow = entry.overflow.saturating_add(1);
                        }
                        ErrorClass::Interrupted
                        | ErrorClass::InvalidArgument
                        | ErrorClass::LimitExceeded => {}
                    }
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());
    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current thread's metrics counters.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics counters for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored when the closure returns or unwinds.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

/// Span
/// RAII guard that emits start/finish events for one evaluation pass.
/// A span dropped without an outcome reports the pass as interrupted.

pub(crate) struct Span {
    arity: usize,
    elements: u64,
    outcome: Option<EvalOutcome>,
    enabled: bool,
}

impl Span {
    #[must_use]
    pub(crate) fn new(arity: usize, enabled: bool) -> Self {
        if enabled {
            record(MetricsEvent::EvalStart { arity });
        }

        Self {
            arity,
            elements: 0,
            outcome: None,
            enabled,
        }
    }

    pub(crate) const fn set_elements(&mut self, elements: u64) {
        self.elements = elements;
    }

    pub(crate) const fn set_outcome(&mut self, outcome: EvalOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for Span {
    fn drop(&mut self) {
        if self.enabled {
            record(MetricsEvent::EvalFinish {
                arity: self.arity,
                elements: self.elements,
                outcome: self.outcome.unwrap_or(EvalOutcome::Interrupted),
            });
        }
    }
}
