//! Result element type selection

use running_median::Sample;

/// Input element type and the sample type its medians are computed in
///
/// Floats keep their own type. Integers promote to `f64`, since the median
/// of an even window is the mean of two values and need not be integral.
/// 64-bit integers beyond 2^53 lose precision in the conversion.
pub trait Promote: Copy {
    /// Element type of the filtered output
    type Output: Sample;

    /// Convert one input element
    fn promote(self) -> Self::Output;
}

impl Promote for f32 {
    type Output = f32;

    #[inline]
    fn promote(self) -> f32 {
        self
    }
}

impl Promote for f64 {
    type Output = f64;

    #[inline]
    fn promote(self) -> f64 {
        self
    }
}

macro_rules! impl_promote_integer {
    ($($t:ty),*) => {
        $(
            impl Promote for $t {
                type Output = f64;

                #[inline]
                fn promote(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_promote_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
