//! Signed index types shared by every forest array.
//!
//! Downstream crates are generic over `FrontIndex` so the same algorithms run
//! on 32-bit and 64-bit index arrays. `EMPTY` is the "unset / no parent"
//! sentinel and `MAX` is the largest representable count.

use std::fmt;

/// Signed integer type used for dimensions, parents, pivot counts and sizes.
pub trait FrontIndex:
    Copy + Ord + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Sentinel for "no parent" and "size never set".
    const EMPTY: Self;
    /// Clamp value for counts that do not fit the type.
    const MAX: Self;
    const ZERO: Self;

    /// Widen losslessly for overflow-free arithmetic.
    fn widen(self) -> i128;

    /// Narrow a wide value, saturating at `MAX` (and at the type minimum).
    fn narrow_saturating(wide: i128) -> Self;

    /// Convert a non-negative value to a `usize` position. Negative values
    /// (including `EMPTY`) yield `None`.
    fn to_usize(self) -> Option<usize>;

    /// Convert a position into this index type, if it fits.
    fn from_usize(i: usize) -> Option<Self>;

    #[inline]
    fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

macro_rules! impl_front_index {
    ($t:ty) => {
        impl FrontIndex for $t {
            const EMPTY: Self = -1;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            #[inline]
            fn widen(self) -> i128 {
                self as i128
            }

            #[inline]
            fn narrow_saturating(wide: i128) -> Self {
                if wide > <$t>::MAX as i128 {
                    <$t>::MAX
                } else if wide < <$t>::MIN as i128 {
                    <$t>::MIN
                } else {
                    wide as $t
                }
            }

            #[inline]
            fn to_usize(self) -> Option<usize> {
                usize::try_from(self).ok()
            }

            #[inline]
            fn from_usize(i: usize) -> Option<Self> {
                <$t>::try_from(i).ok()
            }
        }
    };
}

impl_front_index!(i32);
impl_front_index!(i64);
impl_front_index!(isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_minus_one() {
        assert_eq!(<i32 as FrontIndex>::EMPTY, -1);
        assert_eq!(<i64 as FrontIndex>::EMPTY, -1);
        assert!(FrontIndex::is_empty(-1i32));
        assert!(!FrontIndex::is_empty(0i64));
    }

    #[test]
    fn narrow_saturates_at_max() {
        let wide = 100_000i128 * 100_000i128;
        assert_eq!(<i32 as FrontIndex>::narrow_saturating(wide), i32::MAX);
        assert_eq!(<i64 as FrontIndex>::narrow_saturating(wide), 10_000_000_000);
    }

    #[test]
    fn negative_values_have_no_position() {
        assert_eq!((-1i32).to_usize(), None);
        assert_eq!(7i64.to_usize(), Some(7));
        assert_eq!(<i32 as FrontIndex>::from_usize(usize::MAX), None);
    }
}
