use num_traits::{NumCast, ToPrimitive, Zero};
use std::fmt::Debug;

///
/// Numeric
///
/// Element types accepted by the arithmetic consumers.
///
/// Sums and averages accumulate in a wider type than the element:
/// integers widen to the next integer width, `f32` widens to `f64`.
/// Sums narrow back to the element type when finished; averages always
/// divide in floating point.
///

pub trait Numeric: Copy + Debug + PartialOrd + 'static {
    /// Accumulator used by `Sum` and `Average`.
    type Acc: Copy + Debug;

    /// Result type of `Average`.
    type Mean: Copy + Debug + PartialEq;

    fn acc_zero() -> Self::Acc;

    /// Add one element to the accumulator; `None` on overflow.
    fn acc_add(acc: Self::Acc, value: Self) -> Option<Self::Acc>;

    /// Narrow an accumulated sum back to the element type; `None` when it
    /// does not fit.
    fn narrow(acc: Self::Acc) -> Option<Self>;

    /// Divide an accumulated sum by a non-zero element count.
    fn mean(acc: Self::Acc, count: u64) -> Option<Self::Mean>;
}

macro_rules! impl_integer_numeric {
    ($($ty:ty => $acc:ty),* $(,)?) => {
        $(
            impl Numeric for $ty {
                type Acc = $acc;
                type Mean = f64;

                fn acc_zero() -> $acc {
                    <$acc>::zero()
                }

                fn acc_add(acc: $acc, value: Self) -> Option<$acc> {
                    acc.checked_add(<$acc as From<$ty>>::from(value))
                }

                fn narrow(acc: $acc) -> Option<Self> {
                    NumCast::from(acc)
                }

                fn mean(acc: $acc, count: u64) -> Option<f64> {
                    Some(acc.to_f64()? / count.to_f64()?)
                }
            }
        )*
    };
}

impl_integer_numeric! {
    i8 => i64,
    i16 => i64,
    i32 => i64,
    i64 => i128,
    u8 => u64,
    u16 => u64,
    u32 => u64,
    u64 => u128,
}

impl Numeric for f32 {
    type Acc = f64;
    type Mean = Self;

    fn acc_zero() -> f64 {
        0.0
    }

    fn acc_add(acc: f64, value: Self) -> Option<f64> {
        Some(acc + <f64 as From<f32>>::from(value))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn narrow(acc: f64) -> Option<Self> {
        Some(acc as Self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mean(acc: f64, count: u64) -> Option<Self> {
        Some((acc / count.to_f64()?) as Self)
    }
}

impl Numeric for f64 {
    type Acc = Self;
    type Mean = Self;

    fn acc_zero() -> Self {
        0.0
    }

    fn acc_add(acc: Self, value: Self) -> Option<Self> {
        Some(acc + value)
    }

    fn narrow(acc: Self) -> Option<Self> {
        Some(acc)
    }

    fn mean(acc: Self, count: u64) -> Option<Self> {
        Some(acc / count.to_f64()?)
    }
}
