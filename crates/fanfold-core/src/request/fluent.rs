//! Module: request::fluent
//! Responsibility: chained builder entry points over request nodes.
//! Does not own: consumer semantics.
//! Boundary: sugar only; every method ends in `Request::new` or `Request::add`.

use crate::{
    consumer::{
        All, Any, Average, Collect, Consumer, Count, CountWhere, ExtremaBy, Extreme, First, Last,
        NaturalOrder, NullableAverage, Numeric, Select, Sum,
    },
    factory::ConsumerFactory,
    request::{Append, ConsumerSet, Extended, Request},
};

///
/// AggregateSource
///
/// Starts a request from any `IntoIterator`. Each `get_*` method wraps the
/// source with one built-in consumer; further slots are added with
/// `Request::and` or its `and_*` shorthands.
///

pub trait AggregateSource: IntoIterator + Sized {
    fn aggregate<C>(self, consumer: C) -> Request<Self, (C,)>
    where
        C: Consumer<Self::Item>,
    {
        Request::new(self, consumer)
    }

    fn get_count(self) -> Request<Self, (Count,)> {
        self.aggregate(ConsumerFactory::count())
    }

    fn get_count_where<P>(self, predicate: P) -> Request<Self, (CountWhere<P>,)>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.aggregate(CountWhere::new(predicate))
    }

    fn get_any<P>(self, predicate: P) -> Request<Self, (Any<P>,)>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.aggregate(Any::new(predicate))
    }

    fn get_all<P>(self, predicate: P) -> Request<Self, (All<P>,)>
    where
        P: Fn(&Self::Item) -> bool,
    {
        self.aggregate(All::new(predicate))
    }

    fn get_sum(self) -> Request<Self, (Sum<Self::Item>,)>
    where
        Self::Item: Numeric,
    {
        self.aggregate(ConsumerFactory::sum())
    }

    fn get_sum_by<T, F>(self, selector: F) -> Request<Self, (Select<F, Sum<T>>,)>
    where
        T: Numeric,
        F: Fn(&Self::Item) -> T,
    {
        self.aggregate(Select::new(selector, Sum::new()))
    }

    fn get_average(self) -> Request<Self, (Average<Self::Item>,)>
    where
        Self::Item: Numeric,
    {
        self.aggregate(ConsumerFactory::average())
    }

    fn get_average_by<T, F>(self, selector: F) -> Request<Self, (Select<F, Average<T>>,)>
    where
        T: Numeric,
        F: Fn(&Self::Item) -> T,
    {
        self.aggregate(Select::new(selector, Average::new()))
    }

    fn get_nullable_average_by<T, F>(
        self,
        selector: F,
    ) -> Request<Self, (Select<F, NullableAverage<T>>,)>
    where
        T: Numeric,
        F: Fn(&Self::Item) -> Option<T>,
    {
        self.aggregate(Select::new(selector, NullableAverage::new()))
    }

    fn get_min(self) -> Request<Self, (Extreme<Self::Item>,)>
    where
        Self::Item: Clone + PartialOrd,
    {
        self.aggregate(ConsumerFactory::min())
    }

    fn get_max(self) -> Request<Self, (Extreme<Self::Item>,)>
    where
        Self::Item: Clone + PartialOrd,
    {
        self.aggregate(ConsumerFactory::max())
    }

    fn get_minimums_by<K, F>(
        self,
        key_of: F,
    ) -> Request<Self, (ExtremaBy<Self::Item, K, F, NaturalOrder>,)>
    where
        Self::Item: Clone,
        K: PartialOrd,
        F: Fn(&Self::Item) -> K,
    {
        self.aggregate(ConsumerFactory::minimums_by(key_of))
    }

    fn get_maximums_by<K, F>(
        self,
        key_of: F,
    ) -> Request<Self, (ExtremaBy<Self::Item, K, F, NaturalOrder>,)>
    where
        Self::Item: Clone,
        K: PartialOrd,
        F: Fn(&Self::Item) -> K,
    {
        self.aggregate(ConsumerFactory::maximums_by(key_of))
    }

    fn get_first(self) -> Request<Self, (First<Self::Item>,)>
    where
        Self::Item: Clone,
    {
        self.aggregate(ConsumerFactory::first())
    }

    fn get_last(self) -> Request<Self, (Last<Self::Item>,)>
    where
        Self::Item: Clone,
    {
        self.aggregate(ConsumerFactory::last())
    }

    fn get_collect(self) -> Request<Self, (Collect<Self::Item>,)>
    where
        Self::Item: Clone,
    {
        self.aggregate(ConsumerFactory::collect())
    }
}

impl<S: IntoIterator> AggregateSource for S {}

// Shorthands for extending an existing node by one slot.
impl<S, C> Request<S, C>
where
    S: IntoIterator,
    C: ConsumerSet<S::Item>,
{
    pub fn and<N>(self, consumer: N) -> Request<S, Extended<C, N>>
    where
        N: Consumer<S::Item>,
        C: Append<N>,
        Extended<C, N>: ConsumerSet<S::Item>,
    {
        self.add(consumer)
    }

    pub fn and_count(self) -> Request<S, Extended<C, Count>>
    where
        C: Append<Count>,
        Extended<C, Count>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::count())
    }

    pub fn and_count_where<P>(self, predicate: P) -> Request<S, Extended<C, CountWhere<P>>>
    where
        P: Fn(&S::Item) -> bool,
        C: Append<CountWhere<P>>,
        Extended<C, CountWhere<P>>: ConsumerSet<S::Item>,
    {
        self.add(CountWhere::new(predicate))
    }

    pub fn and_sum(self) -> Request<S, Extended<C, Sum<S::Item>>>
    where
        S::Item: Numeric,
        C: Append<Sum<S::Item>>,
        Extended<C, Sum<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::sum())
    }

    pub fn and_sum_by<T, F>(self, selector: F) -> Request<S, Extended<C, Select<F, Sum<T>>>>
    where
        T: Numeric,
        F: Fn(&S::Item) -> T,
        C: Append<Select<F, Sum<T>>>,
        Extended<C, Select<F, Sum<T>>>: ConsumerSet<S::Item>,
    {
        self.add(Select::new(selector, Sum::new()))
    }

    pub fn and_average(self) -> Request<S, Extended<C, Average<S::Item>>>
    where
        S::Item: Numeric,
        C: Append<Average<S::Item>>,
        Extended<C, Average<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::average())
    }

    pub fn and_average_by<T, F>(
        self,
        selector: F,
    ) -> Request<S, Extended<C, Select<F, Average<T>>>>
    where
        T: Numeric,
        F: Fn(&S::Item) -> T,
        C: Append<Select<F, Average<T>>>,
        Extended<C, Select<F, Average<T>>>: ConsumerSet<S::Item>,
    {
        self.add(Select::new(selector, Average::new()))
    }

    pub fn and_nullable_average_by<T, F>(
        self,
        selector: F,
    ) -> Request<S, Extended<C, Select<F, NullableAverage<T>>>>
    where
        T: Numeric,
        F: Fn(&S::Item) -> Option<T>,
        C: Append<Select<F, NullableAverage<T>>>,
        Extended<C, Select<F, NullableAverage<T>>>: ConsumerSet<S::Item>,
    {
        self.add(Select::new(selector, NullableAverage::new()))
    }

    pub fn and_min(self) -> Request<S, Extended<C, Extreme<S::Item>>>
    where
        S::Item: Clone + PartialOrd,
        C: Append<Extreme<S::Item>>,
        Extended<C, Extreme<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::min())
    }

    pub fn and_max(self) -> Request<S, Extended<C, Extreme<S::Item>>>
    where
        S::Item: Clone + PartialOrd,
        C: Append<Extreme<S::Item>>,
        Extended<C, Extreme<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::max())
    }

    pub fn and_minimums_by<K, F>(
        self,
        key_of: F,
    ) -> Request<S, Extended<C, ExtremaBy<S::Item, K, F, NaturalOrder>>>
    where
        S::Item: Clone,
        K: PartialOrd,
        F: Fn(&S::Item) -> K,
        C: Append<ExtremaBy<S::Item, K, F, NaturalOrder>>,
        Extended<C, ExtremaBy<S::Item, K, F, NaturalOrder>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::minimums_by(key_of))
    }

    pub fn and_maximums_by<K, F>(
        self,
        key_of: F,
    ) -> Request<S, Extended<C, ExtremaBy<S::Item, K, F, NaturalOrder>>>
    where
        S::Item: Clone,
        K: PartialOrd,
        F: Fn(&S::Item) -> K,
        C: Append<ExtremaBy<S::Item, K, F, NaturalOrder>>,
        Extended<C, ExtremaBy<S::Item, K, F, NaturalOrder>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::maximums_by(key_of))
    }

    pub fn and_first(self) -> Request<S, Extended<C, First<S::Item>>>
    where
        S::Item: Clone,
        C: Append<First<S::Item>>,
        Extended<C, First<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::first())
    }

    pub fn and_last(self) -> Request<S, Extended<C, Last<S::Item>>>
    where
        S::Item: Clone,
        C: Append<Last<S::Item>>,
        Extended<C, Last<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::last())
    }

    pub fn and_collect(self) -> Request<S, Extended<C, Collect<S::Item>>>
    where
        S::Item: Clone,
        C: Append<Collect<S::Item>>,
        Extended<C, Collect<S::Item>>: ConsumerSet<S::Item>,
    {
        self.add(ConsumerFactory::collect())
    }
}
