use crate::{
    consumer::{AggregateKind, Consumer},
    error::AggregateError,
};

///
/// Select
///
/// Selector-based adaptor: applies `selector` to each element and feeds the
/// projected value to the inner consumer. A selector returning `Option<V>`
/// pairs with the nullable consumers, which skip `None`.
///

#[derive(Clone, Copy, Debug)]
pub struct Select<F, C> {
    selector: F,
    inner: C,
}

impl<F, C> Select<F, C> {
    pub const fn new(selector: F, inner: C) -> Self {
        Self { selector, inner }
    }
}

impl<E, V, F, C> Consumer<E> for Select<F, C>
where
    F: Fn(&E) -> V,
    C: Consumer<V>,
{
    type Output = C::Output;

    fn accept(&mut self, element: &E) {
        let value = (self.selector)(element);
        self.inner.accept(&value);
    }

    fn finish(self) -> Result<C::Output, AggregateError> {
        self.inner.finish()
    }

    fn kind(&self) -> AggregateKind {
        self.inner.kind()
    }
}
