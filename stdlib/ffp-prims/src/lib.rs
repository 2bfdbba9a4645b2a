//! FFP primitives - scalar float operations partitioned by poison safety
//!
//! This crate builds and binds the native side of a fast-math float
//! library. The math itself is trivial: every operation forwards to the
//! platform math routines. What matters is which compilation unit each
//! operation lives in, because that decides what a host may pass to it.
//!
//! # Units
//!
//! | Unit | Source | Module | May receive poison | `finite-math-only` |
//! |------|--------|--------|--------------------|--------------------|
//! | Unconstrained arithmetic | `csrc/arith.c` | [`arith`] | yes | allowed |
//! | Boundary-safe | `csrc/poison_safe.c` | [`poison_safe`] | yes | allowed |
//! | Boundary-unsafe | `csrc/poison_unsafe.c` | [`poison_unsafe`] | **no**, freeze first | **forbidden** |
//!
//! The build script compiles each unit into its own static library with the
//! flags of the build plan (see `ffp-codegen`), after checking the plan
//! against the contract. [`built`] records what was applied.
//!
//! # FFI Conventions
//!
//! All entry points follow these conventions:
//! - C ABI, named `ffp_<unit>_<op>_<width>`, e.g. `ffp_unsafe_ln_f64`
//! - Scalars by value; no pointers, no allocation, no state
//! - Total: results are reported, never errors. IEEE special values are
//!   ordinary results.
//!
//! Each unit module declares its entry points and exposes them as generic
//! functions dispatching on the width, so `poison_unsafe::ln(x)` calls
//! `ffp_unsafe_ln_f32` or `ffp_unsafe_ln_f64`.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod macros;

pub mod arith;
pub mod built;
pub mod float;
pub mod poison_safe;
pub mod poison_unsafe;

pub use ffp_catalog::{SafetyClass, Width};
pub use float::Float;

/// A float width every unit is bound for.
pub trait Prim: Float + arith::Unit + poison_safe::Unit + poison_unsafe::Unit {}

impl<F> Prim for F where F: Float + arith::Unit + poison_safe::Unit + poison_unsafe::Unit {}

/// Base names a unit exports, as declared by its binding.
#[must_use]
pub fn exported_names(unit: SafetyClass) -> &'static [&'static str] {
    match unit {
        SafetyClass::Unconstrained => arith::EXPORTS,
        SafetyClass::BoundarySafe => poison_safe::EXPORTS,
        SafetyClass::BoundaryUnsafe => poison_unsafe::EXPORTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffp_catalog as catalog;
    use std::collections::HashSet;

    #[test]
    fn test_every_catalogued_operation_is_exported_by_its_unit() {
        for op in catalog::OPERATIONS {
            assert!(
                exported_names(op.class).contains(&op.name),
                "{} is catalogued as {} but not exported by that unit",
                op.name,
                op.class
            );
        }
    }

    #[test]
    fn test_unit_exports_match_catalogue() {
        for unit in SafetyClass::ALL {
            let generated: HashSet<_> = exported_names(unit).iter().copied().collect();
            let catalogued: HashSet<_> = catalog::unit_exports(unit).into_iter().collect();
            assert_eq!(generated, catalogued, "export mismatch in {unit} unit");
        }
    }

    #[test]
    fn test_each_operation_has_exactly_one_class() {
        let mut names: Vec<_> = SafetyClass::ALL
            .iter()
            .flat_map(|&class| catalog::operations_in(class).map(|op| op.name))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, catalog::OPERATIONS.len());
    }

    #[test]
    fn test_unsafe_unit_exports_nothing_from_other_classes() {
        for name in poison_unsafe::EXPORTS {
            let op = catalog::lookup(name).unwrap();
            assert_eq!(op.class, SafetyClass::BoundaryUnsafe);
        }
    }

    #[test]
    fn test_catalogued_symbols_are_defined_in_unit_sources() {
        let csrc = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("csrc");
        for unit in SafetyClass::ALL {
            let file = match unit {
                SafetyClass::Unconstrained => "arith.c",
                SafetyClass::BoundarySafe => "poison_safe.c",
                SafetyClass::BoundaryUnsafe => "poison_unsafe.c",
            };
            let source = std::fs::read_to_string(csrc.join(file)).unwrap();
            for name in catalog::unit_exports(unit) {
                let definition = format!("ffp_{}_{}_##W(", unit.unit_prefix(), name);
                assert!(source.contains(&definition), "{file} does not define {name}");
            }
        }
    }

    fn generic_add<F: Prim>(a: F, b: F) -> F {
        poison_safe::add(arith::add(a, b), b)
    }

    #[test]
    fn test_prim_covers_both_widths() {
        assert_eq!(generic_add(1.0f32, 2.0), 5.0);
        assert_eq!(generic_add(1.0f64, 2.0), 5.0);
    }
}
