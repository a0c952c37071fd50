use crate::{
    consumer::{AggregateKind, Consumer, Numeric},
    error::AggregateError,
};

///
/// Accumulator
///
/// Shared wide-accumulator state for the arithmetic consumers.
/// Overflow is latched on the first failed add and reported at finish.
///

#[derive(Clone, Copy, Debug)]
struct Accumulator<T: Numeric> {
    acc: T::Acc,
    count: u64,
    overflowed: bool,
}

impl<T: Numeric> Accumulator<T> {
    fn new() -> Self {
        Self {
            acc: T::acc_zero(),
            count: 0,
            overflowed: false,
        }
    }

    fn push(&mut self, value: T) {
        self.count = self.count.saturating_add(1);
        if self.overflowed {
            return;
        }
        match T::acc_add(self.acc, value) {
            Some(next) => self.acc = next,
            None => self.overflowed = true,
        }
    }

    fn sum(self) -> Result<T, AggregateError> {
        if self.overflowed {
            return Err(AggregateError::overflow(AggregateKind::Sum));
        }

        T::narrow(self.acc).ok_or_else(|| AggregateError::overflow(AggregateKind::Sum))
    }

    // `None` when nothing was accumulated.
    fn mean(self) -> Result<Option<T::Mean>, AggregateError> {
        if self.count == 0 {
            return Ok(None);
        }
        if self.overflowed {
            return Err(AggregateError::overflow(AggregateKind::Average));
        }

        T::mean(self.acc, self.count)
            .map(Some)
            .ok_or_else(|| AggregateError::overflow(AggregateKind::Average))
    }
}

///
/// Sum
///
/// Sum of a numeric sequence. An empty sequence sums to zero.
///

#[derive(Clone, Copy, Debug)]
pub struct Sum<T: Numeric> {
    state: Accumulator<T>,
}

impl<T: Numeric> Sum<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Accumulator::new(),
        }
    }
}

impl<T: Numeric> Default for Sum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Consumer<T> for Sum<T> {
    type Output = T;

    fn accept(&mut self, element: &T) {
        self.state.push(*element);
    }

    fn finish(self) -> Result<T, AggregateError> {
        self.state.sum()
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Sum
    }
}

///
/// NullableSum
///
/// Sum of a sequence of optional numbers. `None` elements are skipped and
/// an empty (or all-`None`) sequence sums to zero.
///

#[derive(Clone, Copy, Debug)]
pub struct NullableSum<T: Numeric> {
    state: Accumulator<T>,
}

impl<T: Numeric> NullableSum<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Accumulator::new(),
        }
    }
}

impl<T: Numeric> Default for NullableSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Consumer<Option<T>> for NullableSum<T> {
    type Output = T;

    fn accept(&mut self, element: &Option<T>) {
        if let Some(value) = element {
            self.state.push(*value);
        }
    }

    fn finish(self) -> Result<T, AggregateError> {
        self.state.sum()
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Sum
    }
}

///
/// Average
///
/// Arithmetic mean of a numeric sequence, divided in floating point.
/// Fails with an empty-sequence error when no element was observed.
///

#[derive(Clone, Copy, Debug)]
pub struct Average<T: Numeric> {
    state: Accumulator<T>,
}

impl<T: Numeric> Average<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Accumulator::new(),
        }
    }
}

impl<T: Numeric> Default for Average<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Consumer<T> for Average<T> {
    type Output = T::Mean;

    fn accept(&mut self, element: &T) {
        self.state.push(*element);
    }

    fn finish(self) -> Result<T::Mean, AggregateError> {
        self.state
            .mean()?
            .ok_or_else(|| AggregateError::empty_sequence(AggregateKind::Average))
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Average
    }
}

///
/// NullableAverage
///
/// Arithmetic mean of a sequence of optional numbers. `None` elements add
/// nothing to the sum and nothing to the count. Returns `None` when no
/// value was observed instead of failing.
///

#[derive(Clone, Copy, Debug)]
pub struct NullableAverage<T: Numeric> {
    state: Accumulator<T>,
}

impl<T: Numeric> NullableAverage<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Accumulator::new(),
        }
    }
}

impl<T: Numeric> Default for NullableAverage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Consumer<Option<T>> for NullableAverage<T> {
    type Output = Option<T::Mean>;

    fn accept(&mut self, element: &Option<T>) {
        if let Some(value) = element {
            self.state.push(*value);
        }
    }

    fn finish(self) -> Result<Option<T::Mean>, AggregateError> {
        self.state.mean()
    }

    fn kind(&self) -> AggregateKind {
        AggregateKind::Average
    }
}
