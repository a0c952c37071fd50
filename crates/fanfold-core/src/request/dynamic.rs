//! Module: request::dynamic
//! Responsibility: type-erased request nodes with no arity cap.
//! Does not own: the fan-out itself (shared with typed requests).
//! Boundary: results are read back through typed `Slot` handles.

use crate::{
    config::EvaluationConfig,
    consumer::Consumer,
    error::AggregateError,
    obs::sink::{self, MetricsEvent},
    request::{
        driver,
        set::ConsumerSet,
        state::{NodeState, Phase},
    },
};
use std::{
    any::Any,
    fmt,
    marker::PhantomData,
    sync::atomic::{AtomicU64, Ordering},
};

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

///
/// ErasedConsumer
///
/// Object-safe view of a consumer whose output is boxed on finish.
///

trait ErasedConsumer<E> {
    fn accept_erased(&mut self, element: &E);

    fn finish_boxed(self: Box<Self>) -> Result<Box<dyn Any>, AggregateError>;
}

impl<E, C> ErasedConsumer<E> for C
where
    C: Consumer<E>,
    C::Output: 'static,
{
    fn accept_erased(&mut self, element: &E) {
        Consumer::<E>::accept(self, element);
    }

    fn finish_boxed(self: Box<Self>) -> Result<Box<dyn Any>, AggregateError> {
        let output = Consumer::<E>::finish(*self)?;

        Ok(Box::new(output))
    }
}

///
/// ErasedSet
/// Growable consumer list tagged with the owning request id.
///

struct ErasedSet<E> {
    request: u64,
    consumers: Vec<Box<dyn ErasedConsumer<E>>>,
}

impl<E> ConsumerSet<E> for ErasedSet<E> {
    type Output = DynResults;

    fn arity(&self) -> usize {
        self.consumers.len()
    }

    fn accept_all(&mut self, element: &E) {
        for consumer in &mut self.consumers {
            consumer.accept_erased(element);
        }
    }

    fn finish_all(self) -> Result<DynResults, AggregateError> {
        let mut values = Vec::with_capacity(self.consumers.len());
        for (slot, consumer) in self.consumers.into_iter().enumerate() {
            let value = consumer.finish_boxed().map_err(|err| err.at_slot(slot))?;
            values.push(Some(value));
        }

        Ok(DynResults {
            request: self.request,
            values,
        })
    }
}

///
/// DynRequest
///
/// Request node whose consumers are added at runtime. Each `push` returns a
/// typed `Slot` used to read that consumer's output after evaluation.
/// Evaluation follows the same single-pass, memoized contract as `Request`.
///

pub struct DynRequest<S>
where
    S: IntoIterator,
{
    id: u64,
    state: NodeState<S, ErasedSet<S::Item>, DynResults>,
    arity: usize,
    config: EvaluationConfig,
}

impl<S> DynRequest<S>
where
    S: IntoIterator,
{
    /// Wrap a source with no consumers yet.
    pub fn new(source: S) -> Self {
        let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);

        Self {
            id,
            state: NodeState::Pending {
                source,
                consumers: ErasedSet {
                    request: id,
                    consumers: Vec::new(),
                },
            },
            arity: 0,
            config: EvaluationConfig::default(),
        }
    }

    pub fn try_new(source: Option<S>) -> Result<Self, AggregateError> {
        let source =
            source.ok_or_else(|| AggregateError::invalid_request("request source is required"))?;

        Ok(Self::new(source))
    }

    #[must_use]
    pub const fn with_config(mut self, config: EvaluationConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a consumer in the next slot and return its handle.
    pub fn push<C>(&mut self, consumer: C) -> Result<Slot<C::Output>, AggregateError>
    where
        C: Consumer<S::Item> + 'static,
        C::Output: 'static,
    {
        let Some(set) = self.state.consumers_mut() else {
            return Err(AggregateError::invalid_request(
                "cannot add a consumer to a request that was already evaluated",
            ));
        };
        let index = set.consumers.len();
        set.consumers.push(Box::new(consumer));
        self.arity = set.consumers.len();

        Ok(Slot {
            request: self.id,
            index,
            marker: PhantomData,
        })
    }

    /// `push`, rejecting an absent consumer.
    pub fn try_push<C>(&mut self, consumer: Option<C>) -> Result<Slot<C::Output>, AggregateError>
    where
        C: Consumer<S::Item> + 'static,
        C::Output: 'static,
    {
        let consumer = consumer
            .ok_or_else(|| AggregateError::invalid_request("request consumer is required"))?;

        self.push(consumer)
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[must_use]
    pub const fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Evaluate on first call, then return the cached results.
    ///
    /// A node without consumers is rejected before the source is touched
    /// and stays unevaluated.
    pub fn evaluate(&mut self) -> Result<&DynResults, AggregateError> {
        self.ready()?;
        driver::settle(&mut self.state, &self.config);

        self.state.outcome()
    }

    /// Evaluate (if needed) and read one slot.
    pub fn get<T: 'static>(&mut self, slot: Slot<T>) -> Result<&T, AggregateError> {
        self.evaluate()?.get(slot)
    }

    /// Evaluate (if needed) and take ownership of the results.
    pub fn into_results(self) -> Result<DynResults, AggregateError> {
        self.ready()?;
        let Self { mut state, config, .. } = self;
        driver::settle(&mut state, &config);

        state.into_outcome()
    }

    fn ready(&self) -> Result<(), AggregateError> {
        match self.state.phase() {
            Phase::Unevaluated if self.arity == 0 => Err(AggregateError::invalid_request(
                "request has no consumers to evaluate",
            )),
            Phase::Evaluated => {
                if self.config.record_metrics() {
                    sink::record(MetricsEvent::CachedRead { arity: self.arity });
                }
                Ok(())
            }
            Phase::Unevaluated | Phase::Evaluating => Ok(()),
        }
    }
}

impl<S> fmt::Debug for DynRequest<S>
where
    S: IntoIterator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynRequest")
            .field("id", &self.id)
            .field("arity", &self.arity)
            .field("phase", &self.phase())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

///
/// Slot
///
/// Typed handle to one consumer of a `DynRequest`. Only valid against the
/// results of the request that issued it.
///

pub struct Slot<T> {
    request: u64,
    index: usize,
    marker: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// Position of the consumer within its request.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("request", &self.request)
            .field("index", &self.index)
            .finish()
    }
}

///
/// DynResults
///
/// Outputs of an evaluated `DynRequest`, one per slot in push order.
///

pub struct DynResults {
    request: u64,
    values: Vec<Option<Box<dyn Any>>>,
}

impl DynResults {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the output of `slot`.
    pub fn get<T: 'static>(&self, slot: Slot<T>) -> Result<&T, AggregateError> {
        self.value(slot)?
            .downcast_ref::<T>()
            .ok_or_else(|| slot_type_mismatch(slot.index))
    }

    /// Move the output of `slot` out; later reads of the slot fail.
    pub fn take<T: 'static>(&mut self, slot: Slot<T>) -> Result<T, AggregateError> {
        if !self.value(slot)?.is::<T>() {
            return Err(slot_type_mismatch(slot.index));
        }
        let value = self
            .values
            .get_mut(slot.index)
            .and_then(Option::take)
            .ok_or_else(|| slot_taken(slot.index))?;

        value
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| slot_type_mismatch(slot.index))
    }

    fn value<T>(&self, slot: Slot<T>) -> Result<&dyn Any, AggregateError> {
        if slot.request != self.request {
            return Err(AggregateError::invalid_request(format!(
                "slot {} belongs to a different request",
                slot.index
            )));
        }
        let entry = self.values.get(slot.index).ok_or_else(|| {
            AggregateError::invalid_request(format!(
                "slot {} is out of range for {} results",
                slot.index,
                self.values.len()
            ))
        })?;

        entry.as_deref().ok_or_else(|| slot_taken(slot.index))
    }
}

impl fmt::Debug for DynResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynResults")
            .field("request", &self.request)
            .field("len", &self.values.len())
            .finish_non_exhaustive()
    }
}

fn slot_taken(index: usize) -> AggregateError {
    AggregateError::invalid_request(format!("slot {index} was already taken"))
}

fn slot_type_mismatch(index: usize) -> AggregateError {
    AggregateError::invalid_request(format!("slot {index} holds a different output type"))
}
