//! The fast float wrapper.

use core::cmp::Ordering;
use core::fmt;
use core::iter::{Product, Sum};
use core::num::FpCategory;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use ffp_prims::{poison_safe, poison_unsafe, Prim};

use crate::poison::MaybePoison;
use crate::{HostError, ValueResult};

/// A float on which arithmetic may use fast-math.
///
/// Every `Fp` is treated as possibly poison. Arithmetic and the other
/// boundary-safe operations run on the raw value and stay poison-tolerant;
/// everything else freezes a copy first. Valid inputs pass through
/// unchanged, so as long as no NaN or infinity is ever produced the results
/// are the IEEE ones. Once one is produced, results are unspecified but
/// never undefined.
#[derive(Copy)]
#[repr(transparent)]
pub struct Fp<F>(MaybePoison<F>);

impl<F: Copy> Clone for Fp<F> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

/// A fast `f32`.
pub type Fp32 = Fp<f32>;

/// A fast `f64`.
pub type Fp64 = Fp<f64>;

/// Shorthand for [`Fp32::new`].
#[inline(always)]
#[must_use]
pub const fn fp32(value: f32) -> Fp32 {
    Fp::new(value)
}

/// Shorthand for [`Fp64::new`].
#[inline(always)]
#[must_use]
pub const fn fp64(value: f64) -> Fp64 {
    Fp::new(value)
}

/// Methods that freeze every argument and call the boundary-unsafe unit.
macro_rules! forward_frozen {
    ($(
        $(#[$attr:meta])*
        fn $name:ident(self $(, $arg:ident)*);
    )*) => {
        $(
            $(#[$attr])*
            #[inline]
            #[must_use]
            pub fn $name(self $(, $arg: Self)*) -> Self {
                Self::new(poison_unsafe::$name(self.value() $(, $arg.value())*))
            }
        )*
    };
}

impl<F: Prim> Fp<F> {
    /// `0`
    pub const ZERO: Self = Self::new(F::ZERO);
    /// `1`
    pub const ONE: Self = Self::new(F::ONE);
    /// The smallest finite value.
    pub const MIN: Self = Self::new(F::MIN);
    /// The largest finite value.
    pub const MAX: Self = Self::new(F::MAX);
    /// The smallest positive normal value.
    pub const MIN_POSITIVE: Self = Self::new(F::MIN_POSITIVE);
    /// Machine epsilon.
    pub const EPSILON: Self = Self::new(F::EPSILON);

    /// Wrap a value.
    ///
    /// The value must not be infinite or NaN, and no computation on it may
    /// produce one. If it does, every later result is unspecified.
    #[inline(always)]
    #[must_use]
    pub const fn new(value: F) -> Self {
        Self(MaybePoison::new(value))
    }

    /// Wrap a value, rejecting infinities and NaN.
    ///
    /// This cannot rule out unspecified results: `Fp::new(1.0) /
    /// Fp::new(0.0)` is built from finite values. It is a best-effort check
    /// at the point where data enters.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::NonFinite`] if `value` is infinite or NaN.
    #[inline]
    pub fn new_checked(value: F) -> ValueResult<Self> {
        if value.is_finite() {
            Ok(Self::new(value))
        } else {
            Err(HostError::NonFinite(value.classify()))
        }
    }

    /// The frozen value.
    #[inline(always)]
    #[must_use]
    pub fn value(self) -> F {
        self.0.freeze()
    }

    #[inline(always)]
    fn raw(self) -> F {
        // SAFETY: every caller hands the result straight to the
        // boundary-safe unit, which is defined for every bit pattern, and
        // rewraps what it returns.
        unsafe { self.0.maybe_poison() }
    }

    /// Magnitude with the sign cleared.
    #[inline]
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(poison_safe::abs(self.raw()))
    }

    /// Magnitude of `self` with the sign of `sign`.
    #[inline]
    #[must_use]
    pub fn copysign(self, sign: Self) -> Self {
        Self::new(poison_safe::copysign(self.raw(), sign.raw()))
    }

    /// The larger of two values.
    #[inline]
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(poison_safe::max(self.raw(), other.raw()))
    }

    /// The smaller of two values.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(poison_safe::min(self.raw(), other.raw()))
    }

    /// Raise to an integer power.
    #[inline]
    #[must_use]
    pub fn powi(self, n: i32) -> Self {
        Self::new(poison_safe::powi(self.raw(), n))
    }

    /// Restrict to `[lo, hi]`.
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`. The check runs on frozen copies; the clamp
    /// itself runs on the raw values.
    #[inline]
    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        assert!(
            lo.value() <= hi.value(),
            "clamp bounds out of order: {lo} > {hi}"
        );
        Self::new(poison_safe::clamp(self.raw(), lo.raw(), hi.raw()))
    }

    forward_frozen! {
        /// Arc cosine.
        fn acos(self);
        /// Inverse hyperbolic cosine.
        fn acosh(self);
        /// Arc sine.
        fn asin(self);
        /// Inverse hyperbolic sine.
        fn asinh(self);
        /// Arc tangent.
        fn atan(self);
        /// Four-quadrant arc tangent of `self / other`.
        fn atan2(self, other);
        /// Inverse hyperbolic tangent.
        fn atanh(self);
        /// Cube root.
        fn cbrt(self);
        /// Round up.
        fn ceil(self);
        /// Cosine.
        fn cos(self);
        /// Hyperbolic cosine.
        fn cosh(self);
        /// Euclidean quotient.
        fn div_euclid(self, rhs);
        /// `e^self`
        fn exp(self);
        /// `2^self`
        fn exp2(self);
        /// `e^self - 1`
        fn exp_m1(self);
        /// Round down.
        fn floor(self);
        /// Fractional part.
        fn fract(self);
        /// Natural logarithm.
        fn ln(self);
        /// `ln(1 + self)`
        fn ln_1p(self);
        /// Logarithm in `base`.
        fn log(self, base);
        /// Base-2 logarithm.
        fn log2(self);
        /// Base-10 logarithm.
        fn log10(self);
        /// Fused `self * a + b`.
        fn mul_add(self, a, b);
        /// Raise to a fractional power.
        fn powf(self, n);
        /// Euclidean remainder.
        fn rem_euclid(self, rhs);
        /// Round half away from zero.
        fn round(self);
        /// Sine.
        fn sin(self);
        /// Hyperbolic sine.
        fn sinh(self);
        /// Square root.
        fn sqrt(self);
        /// Tangent.
        fn tan(self);
        /// Hyperbolic tangent.
        fn tanh(self);
        /// Radians to degrees.
        fn to_degrees(self);
        /// Degrees to radians.
        fn to_radians(self);
        /// Round towards zero.
        fn trunc(self);
    }

    /// Sine and cosine from one frozen copy.
    #[inline]
    #[must_use]
    pub fn sin_cos(self) -> (Self, Self) {
        let value = self.value();
        (
            Self::new(poison_unsafe::sin(value)),
            Self::new(poison_unsafe::cos(value)),
        )
    }

    /// Category of the frozen value.
    ///
    /// Never reports [`FpCategory::Nan`] or [`FpCategory::Infinite`]: a
    /// frozen poison value is arbitrary, and `Normal` is as good an answer
    /// as any.
    #[inline]
    #[must_use]
    pub fn classify(self) -> FpCategory {
        match self.value().classify() {
            FpCategory::Nan | FpCategory::Infinite => FpCategory::Normal,
            category => category,
        }
    }

    /// Sign bit of the frozen value is set.
    #[inline]
    #[must_use]
    pub fn is_sign_negative(self) -> bool {
        self.value().is_sign_negative()
    }

    /// Sign bit of the frozen value is clear.
    #[inline]
    #[must_use]
    pub fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }

    /// See [`Fp::classify`].
    #[inline]
    #[must_use]
    pub fn is_normal(self) -> bool {
        self.classify() == FpCategory::Normal
    }

    /// See [`Fp::classify`].
    #[inline]
    #[must_use]
    pub fn is_subnormal(self) -> bool {
        self.classify() == FpCategory::Subnormal
    }
}

impl<F: Prim> Default for Fp<F> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<F: Prim> From<F> for Fp<F> {
    #[inline(always)]
    fn from(value: F) -> Self {
        Self::new(value)
    }
}

// ============================================================
// Arithmetic
// ============================================================

macro_rules! impl_binary_ops {
    ($($op_trait:ident, $op_fn:ident, $assign_trait:ident, $assign_fn:ident;)*) => {
        $(
            impl<F: Prim> $op_trait for Fp<F> {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(self, rhs: Self) -> Self {
                    Self::new(poison_safe::$op_fn(self.raw(), rhs.raw()))
                }
            }

            impl<F: Prim> $op_trait<&Fp<F>> for Fp<F> {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(self, rhs: &Self) -> Self {
                    self.$op_fn(*rhs)
                }
            }

            impl<F: Prim> $op_trait<F> for Fp<F> {
                type Output = Self;

                #[inline(always)]
                fn $op_fn(self, rhs: F) -> Self {
                    self.$op_fn(Self::new(rhs))
                }
            }

            impl<F: Prim> $assign_trait for Fp<F> {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: Self) {
                    *self = self.$op_fn(rhs);
                }
            }

            impl<F: Prim> $assign_trait<&Fp<F>> for Fp<F> {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: &Self) {
                    *self = self.$op_fn(*rhs);
                }
            }

            impl<F: Prim> $assign_trait<F> for Fp<F> {
                #[inline(always)]
                fn $assign_fn(&mut self, rhs: F) {
                    *self = self.$op_fn(Self::new(rhs));
                }
            }
        )*
    };
}

impl_binary_ops! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}

impl<F: Prim> Neg for Fp<F> {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self {
        Self::new(poison_safe::neg(self.raw()))
    }
}

impl<F: Prim> Neg for &Fp<F> {
    type Output = Fp<F>;

    #[inline(always)]
    fn neg(self) -> Fp<F> {
        -*self
    }
}

// The remainder lives in the boundary-unsafe unit, so unlike the other
// operators it freezes.
impl<F: Prim> Rem for Fp<F> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: Self) -> Self {
        Self::new(poison_unsafe::rem(self.value(), rhs.value()))
    }
}

impl<F: Prim> Rem<F> for Fp<F> {
    type Output = Self;

    #[inline]
    fn rem(self, rhs: F) -> Self {
        self % Self::new(rhs)
    }
}

impl<F: Prim> RemAssign for Fp<F> {
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl<F: Prim> RemAssign<F> for Fp<F> {
    #[inline]
    fn rem_assign(&mut self, rhs: F) {
        *self = *self % rhs;
    }
}

impl<F: Prim> Sum for Fp<F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<'a, F: Prim> Sum<&'a Fp<F>> for Fp<F> {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + *x)
    }
}

impl<F: Prim> Sum<F> for Fp<F> {
    fn sum<I: Iterator<Item = F>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<F: Prim> Product for Fp<F> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<'a, F: Prim> Product<&'a Fp<F>> for Fp<F> {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * *x)
    }
}

impl<F: Prim> Product<F> for Fp<F> {
    fn product<I: Iterator<Item = F>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

// ============================================================
// Comparison
// ============================================================

// Only frozen copies are compared. The wrapped values themselves may still
// be poison and freeze differently next time, so consistency between
// comparisons holds only while no NaN or infinity is produced.

impl<F: Prim> PartialEq for Fp<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<F: Prim> PartialEq<F> for Fp<F> {
    #[inline]
    fn eq(&self, other: &F) -> bool {
        self.value() == *other
    }
}

impl<F: Prim> Eq for Fp<F> {}

impl<F: Prim> PartialOrd for Fp<F> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.value() < other.value()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.value() <= other.value()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.value() > other.value()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.value() >= other.value()
    }
}

impl<F: Prim> PartialOrd<F> for Fp<F> {
    #[inline]
    fn partial_cmp(&self, other: &F) -> Option<Ordering> {
        self.value().partial_cmp(other)
    }
}

impl<F: Prim> Ord for Fp<F> {
    // NaN is outside the domain, so the order is total.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        let this = self.value();
        let that = other.value();
        if this < that {
            Ordering::Less
        } else if this > that {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    fn max(self, other: Self) -> Self {
        Fp::max(self, other)
    }

    #[inline]
    fn min(self, other: Self) -> Self {
        Fp::min(self, other)
    }

    #[inline]
    fn clamp(self, lo: Self, hi: Self) -> Self {
        Fp::clamp(self, lo, hi)
    }
}

// ============================================================
// Formatting and conversion
// ============================================================

macro_rules! impl_fmt {
    ($($fmt_trait:ident),*) => {
        $(
            impl<F: Prim> fmt::$fmt_trait for Fp<F> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::$fmt_trait::fmt(&self.value(), f)
                }
            }
        )*
    };
}

impl_fmt!(Debug, Display, LowerExp, UpperExp);

macro_rules! impl_base_conversions {
    ($($base_ty:ident),*) => {
        $(
            impl From<Fp<$base_ty>> for $base_ty {
                #[inline(always)]
                fn from(value: Fp<$base_ty>) -> Self {
                    value.value()
                }
            }

            impl PartialEq<Fp<$base_ty>> for $base_ty {
                #[inline]
                fn eq(&self, other: &Fp<$base_ty>) -> bool {
                    *self == other.value()
                }
            }

            impl Add<Fp<$base_ty>> for $base_ty {
                type Output = Fp<$base_ty>;

                #[inline(always)]
                fn add(self, rhs: Fp<$base_ty>) -> Fp<$base_ty> {
                    Fp::new(self) + rhs
                }
            }

            impl Sub<Fp<$base_ty>> for $base_ty {
                type Output = Fp<$base_ty>;

                #[inline(always)]
                fn sub(self, rhs: Fp<$base_ty>) -> Fp<$base_ty> {
                    Fp::new(self) - rhs
                }
            }

            impl Mul<Fp<$base_ty>> for $base_ty {
                type Output = Fp<$base_ty>;

                #[inline(always)]
                fn mul(self, rhs: Fp<$base_ty>) -> Fp<$base_ty> {
                    Fp::new(self) * rhs
                }
            }

            impl Div<Fp<$base_ty>> for $base_ty {
                type Output = Fp<$base_ty>;

                #[inline(always)]
                fn div(self, rhs: Fp<$base_ty>) -> Fp<$base_ty> {
                    Fp::new(self) / rhs
                }
            }
        )*
    };
}

impl_base_conversions!(f32, f64);

impl From<Fp32> for Fp64 {
    #[inline]
    fn from(value: Fp32) -> Self {
        Fp::new(f64::from(value.value()))
    }
}
