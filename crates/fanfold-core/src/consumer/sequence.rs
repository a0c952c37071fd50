use crate::{
    consumer::{AggregateKind, Consumer},
    error::AggregateError,
};

///
/// First
///

#[derive(Clone, Debug)]
pub struct First<E> {
    first: Option<E>,
}

impl<E> First<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { first: None }
    }
}

impl<E> Default for First<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Consumer<E> for First<E> {
    type Output = E;

    fn accept(&mut self, element: &E) {
        if self.first.is_none() {
            self.first = Some(element.clone());
        }
    }

    fn finish(self) -> Result<E, AggregateError> {
        self.first
            .ok_or_else(|| AggregateError::empty_sequence(AggregateKind::First))
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::First
    }
}

///
/// FirstOrNone
///

#[derive(Clone, Debug)]
pub struct FirstOrNone<E> {
    inner: First<E>,
}

impl<E> FirstOrNone<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: First::new(),
        }
    }
}

impl<E> Default for FirstOrNone<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Consumer<E> for FirstOrNone<E> {
    type Output = Option<E>;

    fn accept(&mut self, element: &E) {
        self.inner.accept(element);
    }

    fn finish(self) -> Result<Option<E>, AggregateError> {
        Ok(self.inner.first)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::First
    }
}

///
/// Last
///

#[derive(Clone, Debug)]
pub struct Last<E> {
    last: Option<E>,
}

impl<E> Last<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }
}

impl<E> Default for Last<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Consumer<E> for Last<E> {
    type Output = E;

    fn accept(&mut self, element: &E) {
        self.last = Some(element.clone());
    }

    fn finish(self) -> Result<E, AggregateError> {
        self.last
            .ok_or_else(|| AggregateError::empty_sequence(AggregateKind::Last))
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Last
    }
}

///
/// LastOrNone
///

#[derive(Clone, Debug)]
pub struct LastOrNone<E> {
    inner: Last<E>,
}

impl<E> LastOrNone<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Last::new() }
    }
}

impl<E> Default for LastOrNone<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Consumer<E> for LastOrNone<E> {
    type Output = Option<E>;

    fn accept(&mut self, element: &E) {
        self.inner.accept(element);
    }

    fn finish(self) -> Result<Option<E>, AggregateError> {
        Ok(self.inner.last)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Last
    }
}

///
/// Fold
///
/// Seeded fold; `step` updates the accumulator in place. Never fails.
///

#[derive(Clone, Debug)]
pub struct Fold<A, F> {
    acc: A,
    step: F,
}

impl<A, F> Fold<A, F> {
    pub const fn new(seed: A, step: F) -> Self {
        Self { acc: seed, step }
    }
}

impl<E, A, F> Consumer<E> for Fold<A, F>
where
    F: FnMut(&mut A, &E),
{
    type Output = A;

    fn accept(&mut self, element: &E) {
        (self.step)(&mut self.acc, element);
    }

    fn finish(self) -> Result<A, AggregateError> {
        Ok(self.acc)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Fold
    }
}

///
/// Reduce
///
/// Unseeded fold: the first element is the seed. Fails on an empty sequence.
///

#[derive(Clone, Debug)]
pub struct Reduce<E, F> {
    acc: Option<E>,
    step: F,
}

impl<E, F> Reduce<E, F> {
    pub const fn new(step: F) -> Self {
        Self { acc: None, step }
    }
}

impl<E, F> Consumer<E> for Reduce<E, F>
where
    E: Clone,
    F: FnMut(E, &E) -> E,
{
    type Output = E;

    fn accept(&mut self, element: &E) {
        self.acc = Some(match self.acc.take() {
            Some(acc) => (self.step)(acc, element),
            None => element.clone(),
        });
    }

    fn finish(self) -> Result<E, AggregateError> {
        self.acc
            .ok_or_else(|| AggregateError::empty_sequence(AggregateKind::Reduce))
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Reduce
    }
}

///
/// Collect
/// Every element, in encounter order.
///

#[derive(Clone, Debug)]
pub struct Collect<E> {
    items: Vec<E>,
}

impl<E> Collect<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl<E> Default for Collect<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Consumer<E> for Collect<E> {
    type Output = Vec<E>;

    fn accept(&mut self, element: &E) {
        self.items.push(element.clone());
    }

    fn finish(self) -> Result<Vec<E>, AggregateError> {
        Ok(self.items)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Collect
    }
}
