use crate::{
    consumer::{AggregateKind, Consumer},
    error::AggregateError,
};

///
/// Count
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Count {
    count: usize,
}

impl Count {
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }
}

impl<E> Consumer<E> for Count {
    type Output = usize;

    fn accept(&mut self, _: &E) {
        self.count = self.count.saturating_add(1);
    }

    fn finish(self) -> Result<usize, AggregateError> {
        Ok(self.count)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Count
    }
}

///
/// CountWhere
/// Number of elements matching a predicate.
///

#[derive(Clone, Copy, Debug)]
pub struct CountWhere<P> {
    predicate: P,
    count: usize,
}

impl<P> CountWhere<P> {
    pub const fn new(predicate: P) -> Self {
        Self {
            predicate,
            count: 0,
        }
    }
}

impl<E, P> Consumer<E> for CountWhere<P>
where
    P: Fn(&E) -> bool,
{
    type Output = usize;

    fn accept(&mut self, element: &E) {
        if (self.predicate)(element) {
            self.count = self.count.saturating_add(1);
        }
    }

    fn finish(self) -> Result<usize, AggregateError> {
        Ok(self.count)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Count
    }
}

///
/// Any
/// True when at least one element matches; false on an empty sequence.
///

#[derive(Clone, Copy, Debug)]
pub struct Any<P> {
    predicate: P,
    matched: bool,
}

impl<P> Any<P> {
    pub const fn new(predicate: P) -> Self {
        Self {
            predicate,
            matched: false,
        }
    }
}

impl<E, P> Consumer<E> for Any<P>
where
    P: Fn(&E) -> bool,
{
    type Output = bool;

    fn accept(&mut self, element: &E) {
        // The source keeps flowing for the other slots; skip the predicate
        // once the answer is settled.
        if !self.matched {
            self.matched = (self.predicate)(element);
        }
    }

    fn finish(self) -> Result<bool, AggregateError> {
        Ok(self.matched)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Any
    }
}

///
/// All
/// True when every element matches; true on an empty sequence.
///

#[derive(Clone, Copy, Debug)]
pub struct All<P> {
    predicate: P,
    failed: bool,
}

impl<P> All<P> {
    pub const fn new(predicate: P) -> Self {
        Self {
            predicate,
            failed: false,
        }
    }
}

impl<E, P> Consumer<E> for All<P>
where
    P: Fn(&E) -> bool,
{
    type Output = bool;

    fn accept(&mut self, element: &E) {
        if !self.failed {
            self.failed = !(self.predicate)(element);
        }
    }

    fn finish(self) -> Result<bool, AggregateError> {
        Ok(!self.failed)
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::All
    }
}
