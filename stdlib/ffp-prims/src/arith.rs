//! Unconstrained arithmetic unit
//!
//! Plain IEEE-754 arithmetic and ordering comparisons, bound from
//! `csrc/arith.c`. These are defined for every bit pattern, NaN and
//! infinities included, so the unit may be built with every fast-math flag
//! and called with unfrozen arguments. Under `finite-math-only` a NaN
//! operand still yields a value, just not the IEEE one.

bind_unit! {
    ffp_arith:
    /// Addition
    fn add(a: F, b: F) -> F;
    /// Subtraction
    fn sub(a: F, b: F) -> F;
    /// Multiplication
    fn mul(a: F, b: F) -> F;
    /// Division
    ///
    /// Division by zero yields an infinity or NaN, never a trap.
    fn div(a: F, b: F) -> F;
    /// Negation (flips the sign bit)
    fn neg(a: F) -> F;
    /// IEEE equality; NaN is unequal to everything
    fn eq(a: F, b: F) -> bool;
    /// Less than
    fn lt(a: F, b: F) -> bool;
    /// Less than or equal
    fn le(a: F, b: F) -> bool;
    /// Greater than
    fn gt(a: F, b: F) -> bool;
    /// Greater than or equal
    fn ge(a: F, b: F) -> bool;
}
