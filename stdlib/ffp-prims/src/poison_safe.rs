//! Boundary-safe unit
//!
//! Operations that produce no undefined behavior for any input bit pattern,
//! including a poison value the host never froze, bound from
//! `csrc/poison_safe.c`. Fast-math is allowed here because the worst outcome
//! is a meaningless but well-defined number.
//!
//! Anything conditional in the unit is a value select, never a branch on a
//! float condition. A branch on a poison condition is UB; a select over
//! poison only yields poison.

bind_unit! {
    ffp_safe:
    /// Addition, re-exposed from the unconstrained set
    fn add(a: F, b: F) -> F;
    /// Subtraction, re-exposed from the unconstrained set
    fn sub(a: F, b: F) -> F;
    /// Multiplication, re-exposed from the unconstrained set
    fn mul(a: F, b: F) -> F;
    /// Division, re-exposed from the unconstrained set
    fn div(a: F, b: F) -> F;
    /// Negation, re-exposed from the unconstrained set
    fn neg(a: F) -> F;
    /// Magnitude with the sign bit cleared
    fn abs(a: F) -> F;
    /// Magnitude of `a` with the sign of `b`
    fn copysign(a: F, b: F) -> F;
    /// Numeric maximum (IEEE `maxNum`)
    ///
    /// If exactly one argument is NaN the other is returned. Both NaN
    /// yields NaN.
    fn max(a: F, b: F) -> F;
    /// Numeric minimum (IEEE `minNum`)
    ///
    /// If exactly one argument is NaN the other is returned. Both NaN
    /// yields NaN.
    fn min(a: F, b: F) -> F;
    /// Raise `a` to an integer power by exponentiation by squaring.
    ///
    /// Only the exponent drives the loop. Negative exponents take the
    /// reciprocal of the positive power, and `powi(x, 0)` is `1` for every
    /// `x`.
    fn powi(a: F, n: i32) -> F;
    /// Bound `a` to `[lo, hi]`.
    ///
    /// Two independent replacements, lowered to selects in optimized
    /// builds. No `lo <= hi` check is made here; that is the host's job, on
    /// frozen values.
    fn clamp(a: F, lo: F, hi: F) -> F;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::built::honors_special_values;
    use ffp_catalog::SafetyClass;

    fn ieee() -> bool {
        honors_special_values(SafetyClass::BoundarySafe)
    }

    #[test]
    fn test_reexposed_arithmetic() {
        assert_eq!(add(1.0f32, 2.0), 3.0);
        assert_eq!(sub(1.0f64, 2.0), -1.0);
        assert_eq!(mul(3.0f64, 2.0), 6.0);
        assert_eq!(div(1.0f32, 4.0), 0.25);
        assert_eq!(neg(0.5f32), -0.5);
    }

    #[test]
    fn test_abs() {
        assert_eq!(abs(-3.5f64), 3.5);
        assert!(abs(-0.0f32).is_sign_positive());
        if ieee() {
            assert_eq!(abs(f64::NEG_INFINITY), f64::INFINITY);
            assert!(abs(f64::NAN).is_nan());
        }
    }

    #[test]
    fn test_copysign() {
        assert_eq!(copysign(5.0f64, -1.0), -5.0);
        assert_eq!(copysign(-5.0f64, 1.0), 5.0);
        assert_eq!(copysign(5.0f32, -2.0), -5.0);
    }

    #[test]
    fn test_max_min_finite() {
        assert_eq!(max(-2.0f32, 3.0), 3.0);
        assert_eq!(min(-2.0f64, 3.0), -2.0);
        assert_eq!(max(f64::MAX, f64::MIN), f64::MAX);
    }

    #[test]
    fn test_max_nan_is_ignored() {
        if !ieee() {
            return;
        }
        assert_eq!(max(f64::NAN, 1.0), 1.0);
        assert_eq!(max(1.0, f64::NAN), 1.0);
        assert!(max(f64::NAN, f64::NAN).is_nan());
    }

    #[test]
    fn test_min_nan_is_ignored() {
        if !ieee() {
            return;
        }
        assert_eq!(min(f32::NAN, 1.0), 1.0);
        assert_eq!(min(1.0, f32::NAN), 1.0);
        assert!(min(f32::NAN, f32::NAN).is_nan());
    }

    #[test]
    fn test_powi() {
        assert_eq!(powi(2.0f64, 10), 1024.0);
        assert_eq!(powi(2.0f32, 10), 1024.0);
        assert_eq!(powi(2.0f64, -2), 0.25);
        assert_eq!(powi(-3.0f64, 3), -27.0);
        assert_eq!(powi(7.0f64, 1), 7.0);
    }

    #[test]
    fn test_powi_zero_exponent() {
        for x in [1.0, -1.0, 0.5, 123.456, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(powi(x, 0), 1.0);
        }
        assert_eq!(powi(f32::NAN, 0), 1.0);
    }

    #[test]
    fn test_powi_extreme_exponents() {
        assert_eq!(powi(1.0f64, i32::MIN), 1.0);
        assert_eq!(powi(1.0f64, i32::MAX), 1.0);
        assert_eq!(powi(2.0f64, -2000), 0.0);
        if ieee() {
            assert_eq!(powi(2.0f64, 2000), f64::INFINITY);
            assert_eq!(powi(0.0f64, -1), f64::INFINITY);
        }
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0f64, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0f64, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5f64, 0.0, 1.0), 0.5);
        assert_eq!(clamp(0.0f32, 0.0, 1.0), 0.0);
        assert_eq!(clamp(1.0f32, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_clamp_nan_passes_through() {
        if !ieee() {
            return;
        }
        // both comparisons are false for NaN, so neither replacement fires
        assert!(clamp(f64::NAN, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_special_inputs_complete() {
        // defined for every bit pattern, whatever the flags
        let _ = clamp(f64::NAN, 0.0, 1.0);
        let _ = max(f32::NAN, f32::INFINITY);
        let _ = powi(f64::NAN, -3);
    }

    #[test]
    fn test_clamp_inverted_bounds_is_defined() {
        // no check in the unit; result is simply `hi`
        assert_eq!(clamp(0.5f64, 1.0, 0.0), 0.0);
    }
}
