//! FFP catalogue - which unit owns each float primitive
//!
//! The single source of truth for which safety class each operation belongs
//! to. A host's boundary layer uses this table to decide whether an
//! argument has to be frozen before the call, and which symbol to bind.
//!
//! # Symbol naming
//!
//! Entry points are named `ffp_<unit>_<op>_<width>`:
//!
//! | Class | Unit prefix |
//! |-------|-------------|
//! | Unconstrained | `arith` |
//! | BoundarySafe | `safe` |
//! | BoundaryUnsafe | `unsafe` |

#![warn(missing_docs)]

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Floating-point width of an entry point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Width {
    /// Single precision.
    F32,
    /// Double precision.
    F64,
}

impl Width {
    /// Both widths, narrowest first.
    pub const ALL: [Width; 2] = [Width::F32, Width::F64];

    /// Symbol suffix for this width.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Number of bits in the representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::F32 => 32,
            Self::F64 => 64,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// How an operation's compilation unit treats possibly-poison input.
///
/// The class is fixed at design time and decides how the operation is
/// compiled, not how it behaves on valid input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SafetyClass {
    /// Plain arithmetic and ordering; defined for every bit pattern.
    Unconstrained,
    /// No input can trigger UB; fast-math is allowed.
    BoundarySafe,
    /// Inputs must be frozen, and the unit must honor NaN and infinities.
    BoundaryUnsafe,
}

impl SafetyClass {
    /// All classes, in unit order.
    pub const ALL: [SafetyClass; 3] = [
        SafetyClass::Unconstrained,
        SafetyClass::BoundarySafe,
        SafetyClass::BoundaryUnsafe,
    ];

    /// Unit prefix used in exported symbol names.
    #[must_use]
    pub const fn unit_prefix(self) -> &'static str {
        match self {
            Self::Unconstrained => "arith",
            Self::BoundarySafe => "safe",
            Self::BoundaryUnsafe => "unsafe",
        }
    }

    /// Stable, human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unconstrained => "unconstrained",
            Self::BoundarySafe => "boundary-safe",
            Self::BoundaryUnsafe => "boundary-unsafe",
        }
    }

    /// Returns true if the caller must freeze arguments before calling.
    #[must_use]
    pub const fn requires_freeze(self) -> bool {
        matches!(self, Self::BoundaryUnsafe)
    }

    /// Returns true if the unit may be built with `finite-math-only`.
    #[must_use]
    pub const fn tolerates_finite_math_only(self) -> bool {
        !matches!(self, Self::BoundaryUnsafe)
    }

    /// Parse a class from its name or unit prefix.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unconstrained" | "arith" => Some(Self::Unconstrained),
            "boundary-safe" | "safe" => Some(Self::BoundarySafe),
            "boundary-unsafe" | "unsafe" => Some(Self::BoundaryUnsafe),
            _ => None,
        }
    }
}

impl fmt::Display for SafetyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of an entry point's C signature, with `W` the float width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Signature {
    /// `(W) -> W`
    Unary,
    /// `(W, W) -> W`
    Binary,
    /// `(W, W, W) -> W`
    Ternary,
    /// `(W, W) -> bool`
    Predicate,
    /// `(W, i32) -> W`
    IntPower,
}

impl Signature {
    /// C-style rendering for a given width.
    #[must_use]
    pub fn render(self, width: Width) -> String {
        let w = width.suffix();
        match self {
            Self::Unary => format!("({w}) -> {w}"),
            Self::Binary => format!("({w}, {w}) -> {w}"),
            Self::Ternary => format!("({w}, {w}, {w}) -> {w}"),
            Self::Predicate => format!("({w}, {w}) -> bool"),
            Self::IntPower => format!("({w}, i32) -> {w}"),
        }
    }
}

/// One catalogue entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Operation {
    /// Base name, without unit prefix or width suffix.
    pub name: &'static str,
    /// The one class this operation belongs to.
    pub class: SafetyClass,
    /// C signature shape.
    pub signature: Signature,
}

impl Operation {
    const fn new(name: &'static str, class: SafetyClass, signature: Signature) -> Self {
        Self {
            name,
            class,
            signature,
        }
    }

    /// Symbol of this operation's entry point in its own unit.
    #[must_use]
    pub fn symbol(&self, width: Width) -> String {
        symbol_in(self.class, self.name, width)
    }

    /// Symbols under which this operation is exported, for one width.
    ///
    /// Arithmetic is re-exposed by the boundary-safe unit, so those
    /// operations have two symbols.
    #[must_use]
    pub fn symbols(&self, width: Width) -> Vec<String> {
        units_exporting(self)
            .map(|unit| symbol_in(unit, self.name, width))
            .collect()
    }
}

fn symbol_in(unit: SafetyClass, name: &str, width: Width) -> String {
    format!("ffp_{}_{}_{}", unit.unit_prefix(), name, width.suffix())
}

use SafetyClass::{BoundarySafe, BoundaryUnsafe, Unconstrained};
use Signature::{Binary, IntPower, Predicate, Ternary, Unary};

/// Every operation exposed at the boundary.
pub static OPERATIONS: &[Operation] = &[
    // Unconstrained arithmetic
    Operation::new("add", Unconstrained, Binary),
    Operation::new("sub", Unconstrained, Binary),
    Operation::new("mul", Unconstrained, Binary),
    Operation::new("div", Unconstrained, Binary),
    Operation::new("neg", Unconstrained, Unary),
    Operation::new("eq", Unconstrained, Predicate),
    Operation::new("lt", Unconstrained, Predicate),
    Operation::new("le", Unconstrained, Predicate),
    Operation::new("gt", Unconstrained, Predicate),
    Operation::new("ge", Unconstrained, Predicate),
    // Boundary-safe
    Operation::new("abs", BoundarySafe, Unary),
    Operation::new("copysign", BoundarySafe, Binary),
    Operation::new("max", BoundarySafe, Binary),
    Operation::new("min", BoundarySafe, Binary),
    Operation::new("powi", BoundarySafe, IntPower),
    Operation::new("clamp", BoundarySafe, Ternary),
    // Boundary-unsafe
    Operation::new("acos", BoundaryUnsafe, Unary),
    Operation::new("acosh", BoundaryUnsafe, Unary),
    Operation::new("asin", BoundaryUnsafe, Unary),
    Operation::new("asinh", BoundaryUnsafe, Unary),
    Operation::new("atan", BoundaryUnsafe, Unary),
    Operation::new("atan2", BoundaryUnsafe, Binary),
    Operation::new("atanh", BoundaryUnsafe, Unary),
    Operation::new("cbrt", BoundaryUnsafe, Unary),
    Operation::new("ceil", BoundaryUnsafe, Unary),
    Operation::new("cos", BoundaryUnsafe, Unary),
    Operation::new("cosh", BoundaryUnsafe, Unary),
    Operation::new("div_euclid", BoundaryUnsafe, Binary),
    Operation::new("exp", BoundaryUnsafe, Unary),
    Operation::new("exp2", BoundaryUnsafe, Unary),
    Operation::new("exp_m1", BoundaryUnsafe, Unary),
    Operation::new("floor", BoundaryUnsafe, Unary),
    Operation::new("fract", BoundaryUnsafe, Unary),
    Operation::new("ln", BoundaryUnsafe, Unary),
    Operation::new("ln_1p", BoundaryUnsafe, Unary),
    Operation::new("log", BoundaryUnsafe, Binary),
    Operation::new("log2", BoundaryUnsafe, Unary),
    Operation::new("log10", BoundaryUnsafe, Unary),
    Operation::new("mul_add", BoundaryUnsafe, Ternary),
    Operation::new("powf", BoundaryUnsafe, Binary),
    Operation::new("rem", BoundaryUnsafe, Binary),
    Operation::new("rem_euclid", BoundaryUnsafe, Binary),
    Operation::new("round", BoundaryUnsafe, Unary),
    Operation::new("sin", BoundaryUnsafe, Unary),
    Operation::new("sinh", BoundaryUnsafe, Unary),
    Operation::new("sqrt", BoundaryUnsafe, Unary),
    Operation::new("tan", BoundaryUnsafe, Unary),
    Operation::new("tanh", BoundaryUnsafe, Unary),
    Operation::new("to_degrees", BoundaryUnsafe, Unary),
    Operation::new("to_radians", BoundaryUnsafe, Unary),
    Operation::new("trunc", BoundaryUnsafe, Unary),
];

/// Arithmetic the boundary-safe unit re-exposes from the unconstrained set.
pub const SAFE_REEXPORTS: &[&str] = &["add", "sub", "mul", "div", "neg"];

/// Look up an operation by base name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Operations whose class is `class`.
pub fn operations_in(class: SafetyClass) -> impl Iterator<Item = &'static Operation> {
    OPERATIONS.iter().filter(move |op| op.class == class)
}

/// Base names of every operation a unit exports, including re-exports.
#[must_use]
pub fn unit_exports(unit: SafetyClass) -> Vec<&'static str> {
    OPERATIONS
        .iter()
        .filter(|op| units_exporting(op).any(|u| u == unit))
        .map(|op| op.name)
        .collect()
}

fn units_exporting(op: &Operation) -> impl Iterator<Item = SafetyClass> {
    let reexported = op.class == Unconstrained && SAFE_REEXPORTS.contains(&op.name);
    std::iter::once(op.class).chain(reexported.then_some(BoundarySafe))
}
