//! Module: consumer
//! Responsibility: the consumer contract and the built-in aggregation kinds.
//! Does not own: source iteration, slot ordering, or result caching.
//! Boundary: state machines driven by the fan-out driver one element at a time.

mod arith;
mod count;
mod extrema;
mod kind;
mod numeric;
mod select;
mod sequence;


use crate::error::AggregateError;

pub use arith::{Average, NullableAverage, NullableSum, Sum};
pub use count::{All, Any, Count, CountWhere};
pub use extrema::{
    ByComparer, Direction, ExtremaBy, Extreme, ExtremeBy, KeyComparer, NaturalOrder,
    NullableExtreme,
};
pub use kind::AggregateKind;
pub use numeric::Numeric;
pub use select::Select;
pub use sequence::{Collect, First, FirstOrNone, Fold, Last, LastOrNone, Reduce};

///
/// Consumer
///
/// Stateful reducer contract consumed by the fan-out driver.
/// `accept` is called once per source element and never fails; faults seen
/// while accepting are latched and reported by `finish`, which runs exactly
/// once after the source is exhausted.
///

pub trait Consumer<E> {
    type Output;

    /// Observe one element of the source.
    fn accept(&mut self, element: &E);

    /// Finalize accumulated state into one result.
    fn finish(self) -> Result<Self::Output, AggregateError>;

    /// Aggregation kind reported in failures and metrics.
    fn kind(&self) -> AggregateKind {
        AggregateKind::Custom
    }
}

///
/// ConsumerExt
///
/// Adaptors available on every consumer.
///

pub trait ConsumerExt: Sized {
    /// Feed this consumer with `selector(element)` instead of the element.
    fn select<F>(self, selector: F) -> Select<F, Self> {
        Select::new(selector, self)
    }
}

impl<C> ConsumerExt for C {}
