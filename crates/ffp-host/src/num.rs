//! `num-traits` implementations, so generic numeric code accepts [`Fp`].
//!
//! Methods that have an [`Fp`] counterpart forward to it, and so keep its
//! freezing rules. The few without one (`hypot`, `signum`, decoding) work on
//! a frozen copy of the base value.

use core::num::FpCategory;

use crate::Fp;

/// Forward to the inherent `Fp` method of the same name.
macro_rules! forward_fp {
    ($(
        $(#[$attr:meta])*
        fn $name:ident(self $(, $arg:ident: $arg_ty:ty)*) -> $ret:ty;
    )*) => {
        $(
            $(#[$attr])*
            #[inline]
            fn $name(self $(, $arg: $arg_ty)*) -> $ret {
                Fp::$name(self $(, $arg)*)
            }
        )*
    };
}

/// Convert through the base type, then wrap.
macro_rules! from_base {
    ($base_ty:ident $(fn $name:ident($arg:ident: $arg_ty:ty);)*) => {
        $(
            #[inline]
            fn $name($arg: $arg_ty) -> Option<Self> {
                <$base_ty as ::num_traits::FromPrimitive>::$name($arg).map(Fp::new)
            }
        )*
    };
}

/// Convert a frozen copy of the base value.
macro_rules! to_base {
    ($base_ty:ident $(fn $name:ident() -> $ret:ty;)*) => {
        $(
            #[inline]
            fn $name(&self) -> Option<$ret> {
                <$base_ty as ::num_traits::ToPrimitive>::$name(&self.value())
            }
        )*
    };
}

macro_rules! impl_num_traits {
    ($($base_ty:ident),*) => {
        $(
            impl ::num_traits::Zero for Fp<$base_ty> {
                #[inline(always)]
                fn zero() -> Self {
                    Self::ZERO
                }

                #[inline]
                fn is_zero(&self) -> bool {
                    self.value() == 0.0
                }
            }

            impl ::num_traits::One for Fp<$base_ty> {
                #[inline(always)]
                fn one() -> Self {
                    Self::ONE
                }
            }

            impl ::num_traits::Bounded for Fp<$base_ty> {
                #[inline]
                fn min_value() -> Self {
                    Self::MIN
                }

                #[inline]
                fn max_value() -> Self {
                    Self::MAX
                }
            }

            impl ::num_traits::Num for Fp<$base_ty> {
                type FromStrRadixErr = <$base_ty as ::num_traits::Num>::FromStrRadixErr;

                fn from_str_radix(s: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
                    <$base_ty as ::num_traits::Num>::from_str_radix(s, radix).map(Fp::new)
                }
            }

            impl ::num_traits::Signed for Fp<$base_ty> {
                #[inline]
                fn abs(&self) -> Self {
                    Fp::abs(*self)
                }

                #[inline]
                fn abs_sub(&self, other: &Self) -> Self {
                    Fp::max(*self - *other, Self::ZERO)
                }

                #[inline]
                fn signum(&self) -> Self {
                    Fp::new(self.value().signum())
                }

                #[inline]
                fn is_positive(&self) -> bool {
                    self.value() > 0.0
                }

                #[inline]
                fn is_negative(&self) -> bool {
                    self.value() < 0.0
                }
            }

            impl ::num_traits::ToPrimitive for Fp<$base_ty> {
                to_base! {
                    $base_ty
                    fn to_isize() -> isize;
                    fn to_i8() -> i8;
                    fn to_i16() -> i16;
                    fn to_i32() -> i32;
                    fn to_i64() -> i64;
                    fn to_i128() -> i128;
                    fn to_usize() -> usize;
                    fn to_u8() -> u8;
                    fn to_u16() -> u16;
                    fn to_u32() -> u32;
                    fn to_u64() -> u64;
                    fn to_u128() -> u128;
                    fn to_f32() -> f32;
                    fn to_f64() -> f64;
                }
            }

            impl ::num_traits::FromPrimitive for Fp<$base_ty> {
                from_base! {
                    $base_ty
                    fn from_isize(n: isize);
                    fn from_i8(n: i8);
                    fn from_i16(n: i16);
                    fn from_i32(n: i32);
                    fn from_i64(n: i64);
                    fn from_i128(n: i128);
                    fn from_usize(n: usize);
                    fn from_u8(n: u8);
                    fn from_u16(n: u16);
                    fn from_u32(n: u32);
                    fn from_u64(n: u64);
                    fn from_u128(n: u128);
                    fn from_f32(n: f32);
                    fn from_f64(n: f64);
                }
            }

            impl ::num_traits::NumCast for Fp<$base_ty> {
                #[inline]
                fn from<N: ::num_traits::ToPrimitive>(n: N) -> Option<Self> {
                    <$base_ty as ::num_traits::NumCast>::from(n).map(Fp::new)
                }
            }

            // NaN and infinity are outside the domain of `Fp`, so the
            // constructors for them panic and the predicates are constant.
            impl ::num_traits::Float for Fp<$base_ty> {
                /// # Panics
                ///
                /// Always; `Fp` has no NaN.
                fn nan() -> Self {
                    panic!(concat!("Fp<", stringify!($base_ty), "> has no NaN"));
                }

                /// # Panics
                ///
                /// Always; use `max_value` as an upper bound instead.
                fn infinity() -> Self {
                    panic!(concat!("Fp<", stringify!($base_ty), "> has no infinity"));
                }

                /// # Panics
                ///
                /// Always; use `min_value` as a lower bound instead.
                fn neg_infinity() -> Self {
                    panic!(concat!("Fp<", stringify!($base_ty), "> has no infinity"));
                }

                #[inline]
                fn neg_zero() -> Self {
                    -Self::ZERO
                }

                #[inline]
                fn min_value() -> Self {
                    Self::MIN
                }

                #[inline]
                fn min_positive_value() -> Self {
                    Self::MIN_POSITIVE
                }

                #[inline]
                fn max_value() -> Self {
                    Self::MAX
                }

                #[inline]
                fn epsilon() -> Self {
                    Self::EPSILON
                }

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }

                #[inline]
                fn is_infinite(self) -> bool {
                    false
                }

                #[inline]
                fn is_finite(self) -> bool {
                    true
                }

                #[inline]
                fn signum(self) -> Self {
                    Fp::new(self.value().signum())
                }

                #[inline]
                fn recip(self) -> Self {
                    Self::ONE / self
                }

                #[inline]
                fn hypot(self, other: Self) -> Self {
                    Fp::new(self.value().hypot(other.value()))
                }

                #[inline]
                #[allow(deprecated)]
                fn abs_sub(self, other: Self) -> Self {
                    Fp::max(self - other, Self::ZERO)
                }

                #[inline]
                fn integer_decode(self) -> (u64, i16, i8) {
                    <$base_ty as ::num_traits::Float>::integer_decode(self.value())
                }

                forward_fp! {
                    fn is_normal(self) -> bool;
                    fn classify(self) -> FpCategory;
                    fn is_sign_positive(self) -> bool;
                    fn is_sign_negative(self) -> bool;
                    fn abs(self) -> Self;
                    fn copysign(self, sign: Self) -> Self;
                    fn max(self, other: Self) -> Self;
                    fn min(self, other: Self) -> Self;
                    fn powi(self, n: i32) -> Self;
                    fn floor(self) -> Self;
                    fn ceil(self) -> Self;
                    fn round(self) -> Self;
                    fn trunc(self) -> Self;
                    fn fract(self) -> Self;
                    fn mul_add(self, a: Self, b: Self) -> Self;
                    fn powf(self, n: Self) -> Self;
                    fn sqrt(self) -> Self;
                    fn cbrt(self) -> Self;
                    fn exp(self) -> Self;
                    fn exp2(self) -> Self;
                    fn exp_m1(self) -> Self;
                    fn ln(self) -> Self;
                    fn ln_1p(self) -> Self;
                    fn log(self, base: Self) -> Self;
                    fn log2(self) -> Self;
                    fn log10(self) -> Self;
                    fn sin(self) -> Self;
                    fn cos(self) -> Self;
                    fn tan(self) -> Self;
                    fn sin_cos(self) -> (Self, Self);
                    fn asin(self) -> Self;
                    fn acos(self) -> Self;
                    fn atan(self) -> Self;
                    fn atan2(self, other: Self) -> Self;
                    fn sinh(self) -> Self;
                    fn cosh(self) -> Self;
                    fn tanh(self) -> Self;
                    fn asinh(self) -> Self;
                    fn acosh(self) -> Self;
                    fn atanh(self) -> Self;
                    fn to_degrees(self) -> Self;
                    fn to_radians(self) -> Self;
                }
            }
        )*
    };
}

impl_num_traits!(f32, f64);

#[cfg(test)]
mod tests {
    use crate::{fp32, fp64, Fp32, Fp64};
    use num_traits::{Bounded, Float, FromPrimitive, NumCast, One, Signed, ToPrimitive, Zero};

    fn hypotenuse<T: Float>(a: T, b: T) -> T {
        (a * a + b * b).sqrt()
    }

    fn mean<T: Float + FromPrimitive>(values: &[T]) -> Option<T> {
        let n = T::from_usize(values.len())?;
        let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
        Some(sum / n)
    }

    #[test]
    fn test_generic_code_accepts_fp() {
        assert_eq!(hypotenuse(fp64(3.0), fp64(4.0)), 5.0);
        assert_eq!(hypotenuse(fp32(5.0), fp32(12.0)), 13.0);
        assert_eq!(
            mean(&[fp64(1.0), fp64(2.0), fp64(6.0), fp64(-1.0)]),
            Some(fp64(2.0))
        );
    }

    #[test]
    fn test_identities_and_bounds() {
        assert!(Fp64::zero().is_zero());
        assert_eq!(Fp32::one(), 1.0);
        assert_eq!(<Fp64 as Bounded>::max_value(), f64::MAX);
        assert_eq!(<Fp32 as Float>::min_positive_value(), f32::MIN_POSITIVE);
        assert_eq!(<Fp64 as Float>::epsilon(), f64::EPSILON);
        assert!(<Fp64 as Float>::neg_zero().is_sign_negative());
    }

    #[test]
    fn test_predicates_assume_finite() {
        let x = fp64(1.5);
        assert!(Float::is_finite(x));
        assert!(!Float::is_nan(x));
        assert!(!Float::is_infinite(x));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(<Fp64 as NumCast>::from(7u8), Some(fp64(7.0)));
        assert_eq!(Fp32::from_i32(-3), Some(fp32(-3.0)));
        assert_eq!(fp64(2.75).to_i32(), Some(2));
        assert_eq!(fp64(-1.0).to_u8(), None);
        assert_eq!(fp32(0.5).to_f64(), Some(0.5));
        assert_eq!(
            <Fp64 as num_traits::Num>::from_str_radix("2.5", 10).ok(),
            Some(fp64(2.5))
        );
    }

    #[test]
    fn test_signed() {
        assert_eq!(Signed::abs(&fp64(-2.0)), 2.0);
        assert_eq!(Signed::signum(&fp64(-2.0)), -1.0);
        assert_eq!(Signed::abs_sub(&fp64(1.0), &fp64(3.0)), 0.0);
        assert!(fp64(0.5).is_positive());
        assert!(fp32(-0.5).is_negative());
    }

    #[test]
    fn test_float_methods_forward() {
        assert_eq!(Float::recip(fp64(4.0)), 0.25);
        assert_eq!(Float::hypot(fp64(3.0), fp64(4.0)), 5.0);
        assert_eq!(Float::max(fp64(1.0), fp64(2.0)), 2.0);
        assert_eq!(Float::powi(fp32(3.0), 2), 9.0);
        assert_eq!(Float::floor(fp64(-1.5)), -2.0);
        assert_eq!(Float::integer_decode(fp64(1.0)), Float::integer_decode(1.0f64));
    }

    #[test]
    #[should_panic(expected = "has no NaN")]
    fn test_nan_is_rejected() {
        let _ = <Fp64 as Float>::nan();
    }

    #[test]
    #[should_panic(expected = "has no infinity")]
    fn test_infinity_is_rejected() {
        let _ = <Fp32 as Float>::infinity();
    }
}
