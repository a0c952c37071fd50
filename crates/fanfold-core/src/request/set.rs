//! Module: request::set
//! Responsibility: fixed-arity consumer tuples and their lock-step fan-out.
//! Does not own: source iteration or result caching.
//! Boundary: the only place that knows slot positions of a typed request.

use crate::{consumer::Consumer, error::AggregateError};

///
/// ConsumerSet
///
/// Ordered collection of consumers fed by one pass. `accept_all` delivers an
/// element to every slot in slot order; `finish_all` finalizes slots in
/// order and stops at the first failure, tagged with its slot index.
///

pub trait ConsumerSet<E> {
    type Output;

    fn arity(&self) -> usize;

    fn accept_all(&mut self, element: &E);

    fn finish_all(self) -> Result<Self::Output, AggregateError>;
}

///
/// Append
///
/// Extends a consumer tuple by one trailing slot. Implemented up to
/// `MAX_ARITY - 1`, so a request can never grow past `MAX_ARITY` slots.
///

pub trait Append<N> {
    type Extended;

    fn append(self, next: N) -> Self::Extended;
}

// Finalize one slot and attach its index to any failure.
fn finish_slot<E, C>(consumer: C, slot: usize) -> Result<C::Output, AggregateError>
where
    C: Consumer<E>,
{
    consumer.finish().map_err(|err| err.at_slot(slot))
}

macro_rules! impl_consumer_set {
    ($arity:literal; $($idx:tt => $C:ident),+) => {
        impl<E, $($C),+> ConsumerSet<E> for ($($C,)+)
        where
            $($C: Consumer<E>,)+
        {
            type Output = ($(<$C as Consumer<E>>::Output,)+);

            fn arity(&self) -> usize {
                $arity
            }

            fn accept_all(&mut self, element: &E) {
                $(self.$idx.accept(element);)+
            }

            fn finish_all(self) -> Result<Self::Output, AggregateError> {
                Ok(($(finish_slot::<E, $C>(self.$idx, $idx)?,)+))
            }
        }
    };
}

macro_rules! impl_append {
    ($($idx:tt => $C:ident),+) => {
        impl<$($C,)+ N> Append<N> for ($($C,)+) {
            type Extended = ($($C,)+ N,);

            fn append(self, next: N) -> Self::Extended {
                ($(self.$idx,)+ next,)
            }
        }
    };
}

impl_consumer_set!(1; 0 => C0);
impl_consumer_set!(2; 0 => C0, 1 => C1);
impl_consumer_set!(3; 0 => C0, 1 => C1, 2 => C2);
impl_consumer_set!(4; 0 => C0, 1 => C1, 2 => C2, 3 => C3);
impl_consumer_set!(5; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4);
impl_consumer_set!(6; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5);
impl_consumer_set!(7; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6);
impl_consumer_set!(8; 0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7);
impl_consumer_set!(9;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8
);
impl_consumer_set!(10;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9
);
impl_consumer_set!(11;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10
);
impl_consumer_set!(12;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11
);
impl_consumer_set!(13;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12
);
impl_consumer_set!(14;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12, 13 => C13
);
impl_consumer_set!(15;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12, 13 => C13, 14 => C14
);
impl_consumer_set!(16;
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12, 13 => C13, 14 => C14, 15 => C15
);

impl_append!(0 => C0);
impl_append!(0 => C0, 1 => C1);
impl_append!(0 => C0, 1 => C1, 2 => C2);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7);
impl_append!(0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9
);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10
);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11
);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12
);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12, 13 => C13
);
impl_append!(
    0 => C0, 1 => C1, 2 => C2, 3 => C3, 4 => C4, 5 => C5, 6 => C6, 7 => C7, 8 => C8,
    9 => C9, 10 => C10, 11 => C11, 12 => C12, 13 => C13, 14 => C14
);
