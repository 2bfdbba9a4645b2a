//! Boundary-unsafe unit
//!
//! Transcendental, rounding and remainder functions, bound from
//! `csrc/poison_unsafe.c`. Their math-library implementations branch
//! internally on special values, so two things must hold before they are
//! sound to call from a fast-math host:
//!
//! 1. Every argument is frozen by the caller. A poison argument reaching a
//!    branch inside libm is UB, and nothing here can detect it.
//! 2. The unit is compiled without `finite-math-only`. That flag is the one
//!    fast-math assumption able to manufacture poison from ordinary NaN or
//!    infinite values; with it off these behave as plain IEEE functions.
//!
//! The first is a caller obligation. The second is checked by the build
//! script, which refuses a plan that breaks it.

bind_unit! {
    ffp_unsafe:
    /// Arc cosine; NaN outside `[-1, 1]`
    fn acos(a: F) -> F;
    /// Inverse hyperbolic cosine
    fn acosh(a: F) -> F;
    /// Arc sine; NaN outside `[-1, 1]`
    fn asin(a: F) -> F;
    /// Inverse hyperbolic sine
    fn asinh(a: F) -> F;
    /// Arc tangent
    fn atan(a: F) -> F;
    /// Four-quadrant arc tangent of `a / b`
    fn atan2(a: F, b: F) -> F;
    /// Inverse hyperbolic tangent
    fn atanh(a: F) -> F;
    /// Cube root
    fn cbrt(a: F) -> F;
    /// Round towards positive infinity
    fn ceil(a: F) -> F;
    /// Cosine
    fn cos(a: F) -> F;
    /// Hyperbolic cosine
    fn cosh(a: F) -> F;
    /// Euclidean division quotient
    fn div_euclid(a: F, b: F) -> F;
    /// `e^a`
    fn exp(a: F) -> F;
    /// `2^a`
    fn exp2(a: F) -> F;
    /// `e^a - 1`, accurate near zero
    fn exp_m1(a: F) -> F;
    /// Round towards negative infinity
    fn floor(a: F) -> F;
    /// Fractional part, `a - trunc(a)`
    fn fract(a: F) -> F;
    /// Natural logarithm; `ln(0)` is `-inf`, negative input gives NaN
    fn ln(a: F) -> F;
    /// `ln(1 + a)`, accurate near zero
    fn ln_1p(a: F) -> F;
    /// Logarithm of `a` in an arbitrary `base`
    fn log(a: F, base: F) -> F;
    /// Base-2 logarithm
    fn log2(a: F) -> F;
    /// Base-10 logarithm
    fn log10(a: F) -> F;
    /// Fused `a * b + c` with a single rounding
    fn mul_add(a: F, b: F, c: F) -> F;
    /// `a` raised to a fractional power
    fn powf(a: F, n: F) -> F;
    /// Truncated remainder (C `fmod`); the result has the sign of `a`
    fn rem(a: F, b: F) -> F;
    /// Euclidean remainder, never negative for finite non-zero `b`
    fn rem_euclid(a: F, b: F) -> F;
    /// Round half away from zero
    fn round(a: F) -> F;
    /// Sine
    fn sin(a: F) -> F;
    /// Hyperbolic sine
    fn sinh(a: F) -> F;
    /// Square root; negative input gives NaN
    fn sqrt(a: F) -> F;
    /// Tangent
    fn tan(a: F) -> F;
    /// Hyperbolic tangent
    fn tanh(a: F) -> F;
    /// Radians to degrees
    fn to_degrees(a: F) -> F;
    /// Degrees to radians
    fn to_radians(a: F) -> F;
    /// Round towards zero
    fn trunc(a: F) -> F;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, FRAC_PI_2, PI};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_trig() {
        assert!(close(sin(0.0), 0.0));
        assert!(close(cos(0.0), 1.0));
        assert!(close(sin(FRAC_PI_2), 1.0));
        assert!(close(atan2(1.0, 1.0), PI / 4.0));
        assert!(close(acos(-1.0), PI));
        assert!(asin(2.0f64).is_nan());
    }

    #[test]
    fn test_hyperbolic() {
        assert_eq!(sinh(0.0f64), 0.0);
        assert_eq!(cosh(0.0f64), 1.0);
        assert_eq!(tanh(f64::INFINITY), 1.0);
        assert!(close(asinh(sinh(0.75)), 0.75));
        assert!(acosh(0.5f64).is_nan());
        assert_eq!(atanh(1.0f64), f64::INFINITY);
    }

    #[test]
    fn test_exp_log() {
        assert!(close(exp(1.0), E));
        assert!(close(exp2(10.0), 1024.0));
        assert_eq!(log2(1024.0f64), 10.0);
        assert!(close(log10(1000.0), 3.0));
        assert!(close(log(81.0, 3.0), 4.0));
        assert_eq!(exp_m1(0.0f64), 0.0);
        assert_eq!(ln_1p(0.0f64), 0.0);
        assert_eq!(exp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_ln_special_values() {
        assert_eq!(ln(0.0f64), f64::NEG_INFINITY);
        assert!(ln(-1.0f64).is_nan());
        assert_eq!(ln(f64::INFINITY), f64::INFINITY);
        assert_eq!(ln(0.0f32), f32::NEG_INFINITY);
        assert!(ln(f32::NAN).is_nan());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(ceil(1.2f64), 2.0);
        assert_eq!(floor(-1.2f64), -2.0);
        assert_eq!(round(2.5f64), 3.0);
        assert_eq!(round(-2.5f64), -3.0);
        assert_eq!(trunc(-1.7f32), -1.0);
        assert_eq!(fract(3.75f64), 0.75);
        assert!(floor(f64::NAN).is_nan());
    }

    #[test]
    fn test_remainders() {
        assert_eq!(rem(7.0f64, 3.0), 1.0);
        assert_eq!(rem(-7.0f64, 3.0), -1.0);
        assert_eq!(rem_euclid(-7.0f64, 3.0), 2.0);
        assert_eq!(div_euclid(-7.0f64, 3.0), -3.0);
        assert!(rem(1.0f32, 0.0).is_nan());
        assert!(rem(f64::INFINITY, 2.0).is_nan());
    }

    #[test]
    fn test_powers_and_roots() {
        assert_eq!(sqrt(16.0f64), 4.0);
        assert!(sqrt(-1.0f64).is_nan());
        assert!(close(cbrt(-27.0), -3.0));
        assert!(close(powf(4.0, 0.5), 2.0));
        assert!((powf(2.0f32, 3.0) - 8.0).abs() < 1e-5);
        assert!(powf(-8.0f64, 1.0 / 3.0).is_nan());
        assert_eq!(mul_add(2.0f64, 3.0, 4.0), 10.0);
    }

    #[test]
    fn test_angle_conversion() {
        assert!(close(to_degrees(PI), 180.0));
        assert!(close(to_radians(180.0), PI));
        assert!((to_degrees(std::f32::consts::PI) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_nan_in_nan_out() {
        let nan = f32::NAN;
        assert!(exp(nan).is_nan());
        assert!(sin(nan).is_nan());
        assert!(atan2(nan, 1.0).is_nan());
        assert!(trunc(nan).is_nan());
    }

    #[test]
    fn test_exports_listed() {
        assert_eq!(EXPORTS.len(), 35);
        assert!(EXPORTS.contains(&"rem"));
        assert!(!EXPORTS.contains(&"add"));
    }
}
