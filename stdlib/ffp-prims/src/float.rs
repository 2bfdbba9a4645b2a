//! Width-generic float abstraction
//!
//! The host wrapper is written once against [`Float`] and instantiated for
//! `f32` and `f64`. The trait carries only what the host needs besides the
//! unit entry points: constants and classification.

use std::fmt;
use std::num::FpCategory;

/// A fixed-width IEEE-754 float.
pub trait Float:
    Copy
    + PartialEq
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + fmt::LowerExp
    + fmt::UpperExp
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Smallest finite value.
    const MIN: Self;
    /// Largest finite value.
    const MAX: Self;
    /// Smallest positive normal value.
    const MIN_POSITIVE: Self;
    /// Machine epsilon.
    const EPSILON: Self;

    /// Neither infinite nor NaN.
    fn is_finite(self) -> bool;
    /// Sign bit is set.
    fn is_sign_negative(self) -> bool;
    /// IEEE category.
    fn classify(self) -> FpCategory;
}

macro_rules! impl_float {
    ($($ty:ident),*) => {
        $(
            impl Float for $ty {
                const ZERO: Self = 0.0;
                const ONE: Self = 1.0;
                const MIN: Self = $ty::MIN;
                const MAX: Self = $ty::MAX;
                const MIN_POSITIVE: Self = $ty::MIN_POSITIVE;
                const EPSILON: Self = $ty::EPSILON;

                #[inline(always)]
                fn is_finite(self) -> bool {
                    <$ty>::is_finite(self)
                }

                #[inline(always)]
                fn is_sign_negative(self) -> bool {
                    <$ty>::is_sign_negative(self)
                }

                #[inline(always)]
                fn classify(self) -> FpCategory {
                    <$ty>::classify(self)
                }
            }
        )*
    };
}

impl_float!(f32, f64);
