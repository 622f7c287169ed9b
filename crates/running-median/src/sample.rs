//! Numeric capability required by the median tracker

use std::fmt::Debug;
use std::ops::{Add, Div};

/// A value the tracker can order and average
///
/// Ordering goes through `PartialOrd`; values that compare unordered with
/// themselves (NaN) are outside the contract and must be rejected before
/// they reach a tracker.
pub trait Sample: Copy + PartialOrd + Add<Output = Self> + Div<Output = Self> + Debug {
    /// Neutral value used for zero padding
    const ZERO: Self;

    /// Divisor for averaging the two middle values
    const TWO: Self;

    /// Mean of two values, used when the window has an even size
    #[inline]
    fn average(a: Self, b: Self) -> Self {
        (a + b) / Self::TWO
    }

    /// True for values with no place in the ordering (NaN)
    #[inline]
    fn is_unordered(self) -> bool {
        self.partial_cmp(&self).is_none()
    }
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const ZERO: Self = 0.0;
                const TWO: Self = 2.0;
            }
        )*
    };
}

impl_float_sample!(f32, f64);
