//! Module: consumer::extrema
//! Responsibility: min/max consumers by value, by key, and by key with ties.
//! Does not own: key extraction policy beyond the supplied selector.
//! Boundary: ordering decisions flow through `KeyComparer` only.

use crate::{
    consumer::{AggregateKind, Consumer},
    error::AggregateError,
};
use std::cmp::Ordering;

///
/// Direction
///
/// Which end of the ordering an extrema consumer keeps.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Min,
    Max,
}

impl Direction {
    /// Return true when `ordering` (candidate vs. current best) replaces the best.
    #[must_use]
    pub const fn improves(self, ordering: Ordering) -> bool {
        matches!(
            (self, ordering),
            (Self::Min, Ordering::Less) | (Self::Max, Ordering::Greater)
        )
    }

    const fn value_kind(self) -> AggregateKind {
        match self {
            Self::Min => AggregateKind::Min,
            Self::Max => AggregateKind::Max,
        }
    }

    const fn by_kind(self) -> AggregateKind {
        match self {
            Self::Min => AggregateKind::MinBy,
            Self::Max => AggregateKind::MaxBy,
        }
    }

    const fn all_by_kind(self) -> AggregateKind {
        match self {
            Self::Min => AggregateKind::MinimumsBy,
            Self::Max => AggregateKind::MaximumsBy,
        }
    }
}

///
/// KeyComparer
///
/// Ordering used by the extrema consumers. `None` means the two keys have
/// no usable ordering, which fails the aggregation with an
/// incomparable-key error.
///
/// A key that is unordered with itself (a float NaN) is not incomparable:
/// the natural order ranks it below every other key and equal to another
/// such key.
///

pub trait KeyComparer<K> {
    fn compare(&self, left: &K, right: &K) -> Option<Ordering>;
}

///
/// NaturalOrder
/// The key type's own `PartialOrd`, with self-unordered keys ranked lowest.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: PartialOrd> KeyComparer<K> for NaturalOrder {
    fn compare(&self, left: &K, right: &K) -> Option<Ordering> {
        natural_order(left, right)
    }
}

// NaN sorts below every number and equals another NaN.
fn natural_order<K: PartialOrd + ?Sized>(left: &K, right: &K) -> Option<Ordering> {
    let left_unordered = left.partial_cmp(left).is_none();
    let right_unordered = right.partial_cmp(right).is_none();

    match (left_unordered, right_unordered) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => left.partial_cmp(right),
    }
}

///
/// ByComparer
/// An explicit total comparer supplied by the caller.
///

#[derive(Clone, Copy, Debug)]
pub struct ByComparer<F>(pub F);

impl<K, F> KeyComparer<K> for ByComparer<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, left: &K, right: &K) -> Option<Ordering> {
        Some((self.0)(left, right))
    }
}

///
/// Extreme
///
/// Minimum or maximum value of a sequence. The first of several equal
/// extremes is kept. Fails on an empty sequence.
///

#[derive(Clone, Debug)]
pub struct Extreme<T> {
    direction: Direction,
    best: Option<T>,
    incomparable: bool,
}

impl<T> Extreme<T> {
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            best: None,
            incomparable: false,
        }
    }

    #[must_use]
    pub const fn min() -> Self {
        Self::new(Direction::Min)
    }

    #[must_use]
    pub const fn max() -> Self {
        Self::new(Direction::Max)
    }
}

impl<T: Clone + PartialOrd> Extreme<T> {
    fn observe(&mut self, value: &T) {
        if self.incomparable {
            return;
        }
        let Some(best) = self.best.as_ref() else {
            self.best = Some(value.clone());
            return;
        };

        match natural_order(value, best) {
            Some(ordering) if self.direction.improves(ordering) => {
                self.best = Some(value.clone());
            }
            Some(_) => {}
            None => self.incomparable = true,
        }
    }

    fn settle(self) -> Result<Option<T>, AggregateError> {
        if self.incomparable {
            return Err(AggregateError::incomparable_key(
                self.direction.value_kind(),
            ));
        }

        Ok(self.best)
    }
}

impl<T: Clone + PartialOrd> Consumer<T> for Extreme<T> {
    type Output = T;

    fn accept(&mut self, element: &T) {
        self.observe(element);
    }

    fn finish(self) -> Result<T, AggregateError> {
        let kind = self.direction.value_kind();

        self.settle()?
            .ok_or_else(|| AggregateError::empty_sequence(kind))
    }

    fn kind(&self) -> AggregateKind {
        self.direction.value_kind()
    }
}

///
/// NullableExtreme
///
/// Minimum or maximum of a sequence of optional values. `None` elements are
/// skipped; an empty (or all-`None`) sequence yields `None`.
///

#[derive(Clone, Debug)]
pub struct NullableExtreme<T> {
    inner: Extreme<T>,
}

impl<T> NullableExtreme<T> {
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            inner: Extreme::new(direction),
        }
    }

    #[must_use]
    pub const fn min() -> Self {
        Self::new(Direction::Min)
    }

    #[must_use]
    pub const fn max() -> Self {
        Self::new(Direction::Max)
    }
}

impl<T: Clone + PartialOrd> Consumer<Option<T>> for NullableExtreme<T> {
    type Output = Option<T>;

    fn accept(&mut self, element: &Option<T>) {
        if let Some(value) = element {
            self.inner.observe(value);
        }
    }

    fn finish(self) -> Result<Option<T>, AggregateError> {
        self.inner.settle()
    }

    fn kind(&self) -> AggregateKind {
        self.inner.direction.value_kind()
    }
}

///
/// ExtremeBy
///
/// The first element whose key is the minimum or maximum.
/// Fails on an empty sequence.
///

#[derive(Clone, Debug)]
pub struct ExtremeBy<E, K, F, C> {
    direction: Direction,
    key_of: F,
    comparer: C,
    best: Option<(K, E)>,
    incomparable: bool,
}

impl<E, K, F, C> ExtremeBy<E, K, F, C> {
    pub const fn new(direction: Direction, key_of: F, comparer: C) -> Self {
        Self {
            direction,
            key_of,
            comparer,
            best: None,
            incomparable: false,
        }
    }
}

impl<E, K, F, C> Consumer<E> for ExtremeBy<E, K, F, C>
where
    E: Clone,
    F: Fn(&E) -> K,
    C: KeyComparer<K>,
{
    type Output = E;

    fn accept(&mut self, element: &E) {
        if self.incomparable {
            return;
        }
        let key = (self.key_of)(element);
        let Some((best, _)) = self.best.as_ref() else {
            self.best = Some((key, element.clone()));
            return;
        };

        match self.comparer.compare(&key, best) {
            Some(ordering) if self.direction.improves(ordering) => {
                self.best = Some((key, element.clone()));
            }
            Some(_) => {}
            None => self.incomparable = true,
        }
    }

    fn finish(self) -> Result<E, AggregateError> {
        let kind = self.direction.by_kind();
        if self.incomparable {
            return Err(AggregateError::incomparable_key(kind));
        }

        self.best
            .map(|(_, element)| element)
            .ok_or_else(|| AggregateError::empty_sequence(kind))
    }

    fn kind(&self) -> AggregateKind {
        self.direction.by_kind()
    }
}

///
/// ExtremaBy
///
/// Every element whose key equals the minimum or maximum key, in encounter
/// order. Equal keys are all retained; a strictly better key resets the
/// winners. An empty sequence yields an empty list.
///

#[derive(Clone, Debug)]
pub struct ExtremaBy<E, K, F, C> {
    direction: Direction,
    key_of: F,
    comparer: C,
    best: Option<K>,
    winners: Vec<E>,
    incomparable: bool,
}

impl<E, K, F, C> ExtremaBy<E, K, F, C> {
    pub const fn new(direction: Direction, key_of: F, comparer: C) -> Self {
        Self {
            direction,
            key_of,
            comparer,
            best: None,
            winners: Vec::new(),
            incomparable: false,
        }
    }
}

impl<E, K, F, C> Consumer<E> for ExtremaBy<E, K, F, C>
where
    E: Clone,
    F: Fn(&E) -> K,
    C: KeyComparer<K>,
{
    type Output = Vec<E>;

    fn accept(&mut self, element: &E) {
        if self.incomparable {
            return;
        }
        let key = (self.key_of)(element);
        let Some(best) = self.best.as_ref() else {
            self.best = Some(key);
            self.winners.push(element.clone());
            return;
        };

        match self.comparer.compare(&key, best) {
            Some(Ordering::Equal) => self.winners.push(element.clone()),
            Some(ordering) if self.direction.improves(ordering) => {
                self.best = Some(key);
                self.winners.clear();
                self.winners.push(element.clone());
            }
            Some(_) => {}
            None => self.incomparable = true,
        }
    }

    fn finish(self) -> Result<Vec<E>, AggregateError> {
        if self.incomparable {
            return Err(AggregateError::incomparable_key(
                self.direction.all_by_kind(),
            ));
        }

        Ok(self.winners)
    }

    fn kind(&self) -> AggregateKind {
        self.direction.all_by_kind()
    }
}
