use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for evaluation passes.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) kinds: BTreeMap<String, KindCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventOps {
    // Driver entrypoints
    pub evaluations: u64,
    pub failed_evaluations: u64,
    pub cached_reads: u64,

    // Source traffic
    pub elements_observed: u64,
    pub max_arity: u64,

    // Consumer finalization
    pub consumer_failures: u64,
}

///
/// KindCounters
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct KindCounters {
    pub(crate) failures: u64,
    pub(crate) empty_sequence: u64,
    pub(crate) incomparable_key: u64,
    pub(crate) overflow: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub counters: EventOps,
    pub kinds: Vec<KindSummary>,
    pub avg_elements_per_evaluation: f64,
}

///
/// KindSummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct KindSummary {
    pub kind: String,
    pub failures: u64,
    pub empty_sequence: u64,
    pub incomparable_key: u64,
    pub overflow: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters (useful in tests).
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Build a metrics report by inspecting in-memory counters only.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let avg_elements_per_evaluation = if snap.ops.evaluations > 0 {
        snap.ops.elements_observed as f64 / snap.ops.evaluations as f64
    } else {
        0.0
    };

    let mut kinds: Vec<KindSummary> = snap
        .kinds
        .iter()
        .map(|(kind, counters)| KindSummary {
            kind: kind.clone(),
            failures: counters.failures,
            empty_sequence: counters.empty_sequence,
            incomparable_key: counters.incomparable_key,
            overflow: counters.overflow,
        })
        .collect();

    // Most failing kinds first; ties stay alphabetical.
    kinds.sort_by(|a, b| b.failures.cmp(&a.failures).then_with(|| a.kind.cmp(&b.kind)));

    EventReport {
        counters: snap.ops,
        kinds,
        avg_elements_per_evaluation,
    }
}
