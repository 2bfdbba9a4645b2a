//! Optimization and fast-math flag sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optimization level for a unit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OptLevel {
    /// No optimizations.
    None,
    /// Basic optimizations.
    Less,
    /// Standard optimizations.
    #[default]
    Default,
    /// Aggressive optimizations.
    Aggressive,
}

impl OptLevel {
    /// The clang-style argument selecting this level.
    #[must_use]
    pub const fn compiler_arg(self) -> &'static str {
        match self {
            Self::None => "-O0",
            Self::Less => "-O1",
            Self::Default => "-O2",
            Self::Aggressive => "-O3",
        }
    }

    /// Whether conditional value replacements are reliably lowered to
    /// selects at this level.
    #[must_use]
    pub const fn lowers_to_selects(self) -> bool {
        matches!(self, Self::Default | Self::Aggressive)
    }
}

impl fmt::Display for OptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Less => "less",
            Self::Default => "default",
            Self::Aggressive => "aggressive",
        };
        f.write_str(name)
    }
}

/// The individual assumptions that make up "fast-math".
///
/// Only `finite_math_only` can turn an ordinary NaN or infinity into
/// poison. The others reorder or relax rounding but keep every result a
/// concrete value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FastMathFlags {
    /// Assume no argument or result is NaN or infinite.
    pub finite_math_only: bool,
    /// Allow reassociation of additions and multiplications.
    pub associative_math: bool,
    /// Allow `x / y` to become `x * (1 / y)`.
    pub reciprocal_math: bool,
    /// Treat `-0.0` and `+0.0` as interchangeable.
    pub no_signed_zeros: bool,
    /// Assume floating-point operations never trap.
    pub no_trapping_math: bool,
    /// Allow fusing multiply and add across statements.
    pub contract_fast: bool,
}

impl FastMathFlags {
    /// Strict IEEE semantics.
    pub const NONE: Self = Self {
        finite_math_only: false,
        associative_math: false,
        reciprocal_math: false,
        no_signed_zeros: false,
        no_trapping_math: false,
        contract_fast: false,
    };

    /// Every fast-math assumption enabled.
    pub const AGGRESSIVE: Self = Self {
        finite_math_only: true,
        associative_math: true,
        reciprocal_math: true,
        no_signed_zeros: true,
        no_trapping_math: true,
        contract_fast: true,
    };

    /// This set with `finite_math_only` turned off.
    #[must_use]
    pub const fn without_finite_math(self) -> Self {
        Self {
            finite_math_only: false,
            ..self
        }
    }

    /// Whether code built with these flags can produce poison from
    /// well-defined inputs.
    #[must_use]
    pub const fn may_produce_poison(self) -> bool {
        self.finite_math_only
    }

    /// Whether no fast-math assumption is enabled at all.
    #[must_use]
    pub fn is_strict(self) -> bool {
        self == Self::NONE
    }

    /// Clang-style arguments enabling this set.
    ///
    /// When other assumptions are on but `finite_math_only` is off, the
    /// negation is passed explicitly so a toolchain default cannot turn it
    /// back on.
    #[must_use]
    pub fn compiler_args(self) -> Vec<&'static str> {
        let mut args = Vec::new();
        if self.finite_math_only {
            args.push("-ffinite-math-only");
        } else if !self.is_strict() {
            args.push("-fno-finite-math-only");
        }
        if self.associative_math {
            args.push("-fassociative-math");
        }
        if self.reciprocal_math {
            args.push("-freciprocal-math");
        }
        if self.no_signed_zeros {
            args.push("-fno-signed-zeros");
        }
        if self.no_trapping_math {
            args.push("-fno-trapping-math");
        }
        if self.contract_fast {
            args.push("-ffp-contract=fast");
        }
        args
    }
}
