//! Module: factory
//! Responsibility: construction of every built-in consumer kind.
//! Does not own: consumer state transitions or request composition.
//! Boundary: the single place where aggregation kinds are instantiated.

use crate::{
    consumer::{
        AggregateKind, All, Any, Average, ByComparer, Collect, Count, CountWhere, Direction,
        ExtremaBy, Extreme, ExtremeBy, First, FirstOrNone, Fold, Last, LastOrNone, NaturalOrder,
        NullableAverage, NullableExtreme, NullableSum, Numeric, Reduce, Select, Sum,
    },
    error::AggregateError,
};
use std::cmp::Ordering;

///
/// ConsumerFactory
///
/// ConsumerFactory builds consumers for each aggregation kind, value-based
/// and selector-based, strict and nullable. The `try_*` constructors accept
/// optional arguments and reject absent ones before any source is touched.
///

pub struct ConsumerFactory;

impl ConsumerFactory {
    // ------------------------------------------------------------------
    // Counting
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn count() -> Count {
        Count::new()
    }

    pub const fn count_where<E, P>(predicate: P) -> CountWhere<P>
    where
        P: Fn(&E) -> bool,
    {
        CountWhere::new(predicate)
    }

    pub const fn any<E, P>(predicate: P) -> Any<P>
    where
        P: Fn(&E) -> bool,
    {
        Any::new(predicate)
    }

    pub const fn all<E, P>(predicate: P) -> All<P>
    where
        P: Fn(&E) -> bool,
    {
        All::new(predicate)
    }

    // ------------------------------------------------------------------
    // Arithmetic
    // ------------------------------------------------------------------

    #[must_use]
    pub fn sum<T: Numeric>() -> Sum<T> {
        Sum::new()
    }

    #[must_use]
    pub fn nullable_sum<T: Numeric>() -> NullableSum<T> {
        NullableSum::new()
    }

    pub fn sum_by<E, T, F>(selector: F) -> Select<F, Sum<T>>
    where
        T: Numeric,
        F: Fn(&E) -> T,
    {
        Select::new(selector, Sum::new())
    }

    pub fn nullable_sum_by<E, T, F>(selector: F) -> Select<F, NullableSum<T>>
    where
        T: Numeric,
        F: Fn(&E) -> Option<T>,
    {
        Select::new(selector, NullableSum::new())
    }

    #[must_use]
    pub fn average<T: Numeric>() -> Average<T> {
        Average::new()
    }

    #[must_use]
    pub fn nullable_average<T: Numeric>() -> NullableAverage<T> {
        NullableAverage::new()
    }

    pub fn average_by<E, T, F>(selector: F) -> Select<F, Average<T>>
    where
        T: Numeric,
        F: Fn(&E) -> T,
    {
        Select::new(selector, Average::new())
    }

    pub fn nullable_average_by<E, T, F>(selector: F) -> Select<F, NullableAverage<T>>
    where
        T: Numeric,
        F: Fn(&E) -> Option<T>,
    {
        Select::new(selector, NullableAverage::new())
    }

    // ------------------------------------------------------------------
    // Extrema
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn min<T: PartialOrd>() -> Extreme<T> {
        Extreme::min()
    }

    #[must_use]
    pub const fn max<T: PartialOrd>() -> Extreme<T> {
        Extreme::max()
    }

    #[must_use]
    pub const fn nullable_min<T: PartialOrd>() -> NullableExtreme<T> {
        NullableExtreme::min()
    }

    #[must_use]
    pub const fn nullable_max<T: PartialOrd>() -> NullableExtreme<T> {
        NullableExtreme::max()
    }

    pub const fn min_by<E, K, F>(key_of: F) -> ExtremeBy<E, K, F, NaturalOrder>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        ExtremeBy::new(Direction::Min, key_of, NaturalOrder)
    }

    pub const fn max_by<E, K, F>(key_of: F) -> ExtremeBy<E, K, F, NaturalOrder>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        ExtremeBy::new(Direction::Max, key_of, NaturalOrder)
    }

    pub const fn minimums_by<E, K, F>(key_of: F) -> ExtremaBy<E, K, F, NaturalOrder>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        ExtremaBy::new(Direction::Min, key_of, NaturalOrder)
    }

    pub const fn maximums_by<E, K, F>(key_of: F) -> ExtremaBy<E, K, F, NaturalOrder>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        ExtremaBy::new(Direction::Max, key_of, NaturalOrder)
    }

    pub const fn minimums_by_with<E, K, F, C>(
        key_of: F,
        comparer: C,
    ) -> ExtremaBy<E, K, F, ByComparer<C>>
    where
        F: Fn(&E) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        ExtremaBy::new(Direction::Min, key_of, ByComparer(comparer))
    }

    pub const fn maximums_by_with<E, K, F, C>(
        key_of: F,
        comparer: C,
    ) -> ExtremaBy<E, K, F, ByComparer<C>>
    where
        F: Fn(&E) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        ExtremaBy::new(Direction::Max, key_of, ByComparer(comparer))
    }

    // ------------------------------------------------------------------
    // Sequence
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn first<E: Clone>() -> First<E> {
        First::new()
    }

    #[must_use]
    pub const fn first_or_none<E: Clone>() -> FirstOrNone<E> {
        FirstOrNone::new()
    }

    #[must_use]
    pub const fn last<E: Clone>() -> Last<E> {
        Last::new()
    }

    #[must_use]
    pub const fn last_or_none<E: Clone>() -> LastOrNone<E> {
        LastOrNone::new()
    }

    #[must_use]
    pub const fn collect<E: Clone>() -> Collect<E> {
        Collect::new()
    }

    pub const fn fold<E, A, F>(seed: A, step: F) -> Fold<A, F>
    where
        F: FnMut(&mut A, &E),
    {
        Fold::new(seed, step)
    }

    pub const fn reduce<E, F>(step: F) -> Reduce<E, F>
    where
        E: Clone,
        F: FnMut(E, &E) -> E,
    {
        Reduce::new(step)
    }

    // ------------------------------------------------------------------
    // Validated entry points
    // ------------------------------------------------------------------

    pub fn try_count_where<E, P>(predicate: Option<P>) -> Result<CountWhere<P>, AggregateError>
    where
        P: Fn(&E) -> bool,
    {
        let predicate = require(predicate, AggregateKind::Count, "predicate")?;

        Ok(CountWhere::new(predicate))
    }

    pub fn try_sum_by<E, T, F>(selector: Option<F>) -> Result<Select<F, Sum<T>>, AggregateError>
    where
        T: Numeric,
        F: Fn(&E) -> T,
    {
        let selector = require(selector, AggregateKind::Sum, "selector")?;

        Ok(Self::sum_by(selector))
    }

    pub fn try_average_by<E, T, F>(
        selector: Option<F>,
    ) -> Result<Select<F, Average<T>>, AggregateError>
    where
        T: Numeric,
        F: Fn(&E) -> T,
    {
        let selector = require(selector, AggregateKind::Average, "selector")?;

        Ok(Self::average_by(selector))
    }

    pub fn try_minimums_by<E, K, F>(
        key_of: Option<F>,
    ) -> Result<ExtremaBy<E, K, F, NaturalOrder>, AggregateError>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        let key_of = require(key_of, AggregateKind::MinimumsBy, "key_selector")?;

        Ok(Self::minimums_by(key_of))
    }

    pub fn try_maximums_by<E, K, F>(
        key_of: Option<F>,
    ) -> Result<ExtremaBy<E, K, F, NaturalOrder>, AggregateError>
    where
        F: Fn(&E) -> K,
        K: PartialOrd,
    {
        let key_of = require(key_of, AggregateKind::MaximumsBy, "key_selector")?;

        Ok(Self::maximums_by(key_of))
    }

    pub fn try_minimums_by_with<E, K, F, C>(
        key_of: Option<F>,
        comparer: Option<C>,
    ) -> Result<ExtremaBy<E, K, F, ByComparer<C>>, AggregateError>
    where
        F: Fn(&E) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        let key_of = require(key_of, AggregateKind::MinimumsBy, "key_selector")?;
        let comparer = require(comparer, AggregateKind::MinimumsBy, "comparer")?;

        Ok(Self::minimums_by_with(key_of, comparer))
    }

    pub fn try_maximums_by_with<E, K, F, C>(
        key_of: Option<F>,
        comparer: Option<C>,
    ) -> Result<ExtremaBy<E, K, F, ByComparer<C>>, AggregateError>
    where
        F: Fn(&E) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        let key_of = require(key_of, AggregateKind::MaximumsBy, "key_selector")?;
        let comparer = require(comparer, AggregateKind::MaximumsBy, "comparer")?;

        Ok(Self::maximums_by_with(key_of, comparer))
    }
}

fn require<T>(
    value: Option<T>,
    kind: AggregateKind,
    argument: &str,
) -> Result<T, AggregateError> {
    value.ok_or_else(|| AggregateError::invalid_argument(kind, argument))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{consumer::Consumer, error::ErrorClass};

    type Pair = (i32, &'static str);

    #[test]
    fn try_maximums_by_rejects_absent_key_selector() {
        let err = ConsumerFactory::try_maximums_by::<Pair, i32, fn(&Pair) -> i32>(None)
            .expect_err("absent key selector must be rejected");

        assert_eq!(err.class, ErrorClass::InvalidArgument);
        assert_eq!(err.kind, Some(AggregateKind::MaximumsBy));
        assert!(err.message.contains("key_selector"));
    }

    #[test]
    fn try_maximums_by_with_rejects_absent_comparer() {
        let err = ConsumerFactory::try_maximums_by_with::<
            Pair,
            i32,
            fn(&Pair) -> i32,
            fn(&i32, &i32) -> Ordering,
        >(Some(|pair: &Pair| pair.0), None)
        .expect_err("absent comparer must be rejected");

        assert!(err.is_invalid_argument());
        assert!(err.message.contains("comparer"));
    }

    #[test]
    fn try_sum_by_accepts_present_selector() {
        let mut sum = ConsumerFactory::try_sum_by(Some(|pair: &Pair| pair.0))
            .expect("present selector should build");
        Consumer::<Pair>::accept(&mut sum, &(2, "a"));
        Consumer::<Pair>::accept(&mut sum, &(5, "b"));

        assert_eq!(Consumer::<Pair>::finish(sum), Ok(7));
    }

    #[test]
    fn factory_kinds_match_constructed_consumers() {
        assert_eq!(
            Consumer::<i32>::kind(&ConsumerFactory::count()),
            AggregateKind::Count
        );
        assert_eq!(
            Consumer::<i32>::kind(&ConsumerFactory::average::<i32>()),
            AggregateKind::Average
        );
        assert_eq!(
            Consumer::<Pair>::kind(&ConsumerFactory::minimums_by(|pair: &Pair| pair.0)),
            AggregateKind::MinimumsBy
        );
    }
}
