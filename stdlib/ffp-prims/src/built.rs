//! Flags the native units of this build were compiled with.
//!
//! Recorded by the build script from the plan it validated.

use ffp_catalog::SafetyClass;

/// One compiled unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltUnit {
    /// Safety class of the unit.
    pub class: SafetyClass,
    /// Source path as written in the plan.
    pub source: &'static str,
    /// Arguments passed to the C compiler.
    pub args: &'static [&'static str],
    /// Whether `finite-math-only` was enabled.
    pub finite_math_only: bool,
}

include!(concat!(env!("OUT_DIR"), "/built_units.rs"));

/// The compiled unit of `class`.
#[must_use]
pub fn unit(class: SafetyClass) -> Option<&'static BuiltUnit> {
    BUILT_UNITS.iter().find(|unit| unit.class == class)
}

/// Whether NaN and infinities keep their IEEE meaning inside the unit.
///
/// False when the unit was built with `finite-math-only`: it still returns
/// some value for every input, but which one is unspecified.
#[must_use]
pub fn honors_special_values(class: SafetyClass) -> bool {
    unit(class).is_some_and(|unit| !unit.finite_math_only)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_unit_per_class() {
        assert_eq!(BUILT_UNITS.len(), SafetyClass::ALL.len());
        for class in SafetyClass::ALL {
            assert!(unit(class).is_some(), "no {class} unit was built");
        }
    }

    #[test]
    fn test_unsafe_unit_built_without_finite_math() {
        let unit = unit(SafetyClass::BoundaryUnsafe).unwrap();
        assert!(!unit.finite_math_only);
        assert!(!unit.args.contains(&"-ffinite-math-only"));
        assert!(honors_special_values(SafetyClass::BoundaryUnsafe));
    }

    #[test]
    fn test_safe_unit_built_with_select_lowering() {
        let unit = unit(SafetyClass::BoundarySafe).unwrap();
        assert!(unit.args.iter().any(|arg| matches!(*arg, "-O2" | "-O3")));
    }

    #[test]
    fn test_sources_are_c_units() {
        for unit in BUILT_UNITS {
            assert!(unit.source.ends_with(".c"), "{} is not a C unit", unit.source);
        }
    }
}
