//! Compiler flag contract for the FFP primitive units.
//!
//! The three primitive units are C sources under `stdlib/ffp-prims/csrc`,
//! each compiled into its own static library by the `ffp-prims` build
//! script. They are only sound when each is compiled with flags its safety
//! class permits. This crate describes those flags as a [`BuildPlan`] and
//! checks a plan against the rules:
//!
//! - exactly one unit per [`SafetyClass`];
//! - the boundary-unsafe unit never enables `finite-math-only`;
//! - the boundary-safe unit is optimized enough for its conditional
//!   replacements to lower to selects;
//! - every unit names its source.
//!
//! Plans are written in TOML, usually in a file named `ffp.toml`:
//!
//! ```toml
//! [[unit]]
//! class = "boundary-unsafe"
//! source = "stdlib/ffp-prims/csrc/poison_unsafe.c"
//! opt-level = "aggressive"
//! lto = true
//!
//! [unit.fast-math]
//! finite-math-only = false
//! associative-math = true
//! ```

#![warn(missing_docs)]

mod flags;

pub use flags::{FastMathFlags, OptLevel};
pub use ffp_catalog::SafetyClass;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// File name searched for by [`find_plan`].
pub const PLAN_FILE: &str = "ffp.toml";

/// Errors raised while loading or checking a build plan.
#[derive(Debug, Error)]
pub enum ContractError {
    /// No unit declared for a class.
    #[error("no unit declared for the {0} class")]
    MissingUnit(SafetyClass),

    /// More than one unit declared for a class.
    #[error("more than one unit declared for the {0} class")]
    DuplicateUnit(SafetyClass),

    /// The boundary-unsafe unit enables `finite-math-only`.
    #[error("boundary-unsafe unit `{0}` enables finite-math-only and may turn NaN or infinity into poison")]
    PoisonProducingUnsafeUnit(Utf8PathBuf),

    /// The boundary-safe unit is built below the select-lowering level.
    #[error("boundary-safe unit `{unit}` is built at opt-level {level}; at least `default` is required")]
    UnoptimizedSafeUnit {
        /// Source of the offending unit.
        unit: Utf8PathBuf,
        /// Level it was configured with.
        level: OptLevel,
    },

    /// A unit does not name its source.
    #[error("the {0} unit has an empty source")]
    EmptySource(SafetyClass),

    /// Plan file not found.
    #[error("build plan not found: {0}")]
    ConfigNotFound(Utf8PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// How one compilation unit is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnitConfig {
    /// Safety class of every operation in the unit.
    pub class: SafetyClass,
    /// C source of the unit, relative to the plan file.
    pub source: Utf8PathBuf,
    /// Optimization level.
    #[serde(default)]
    pub opt_level: OptLevel,
    /// Thin LTO.
    #[serde(default)]
    pub lto: bool,
    /// Fast-math assumptions.
    #[serde(default)]
    pub fast_math: FastMathFlags,
}

impl UnitConfig {
    /// The flag set the units are designed for.
    ///
    /// All three are built at `-O3` with thin LTO and every fast-math
    /// assumption, except that the boundary-unsafe unit drops
    /// `finite-math-only`.
    #[must_use]
    pub fn recommended(class: SafetyClass) -> Self {
        let fast_math = if class.tolerates_finite_math_only() {
            FastMathFlags::AGGRESSIVE
        } else {
            FastMathFlags::AGGRESSIVE.without_finite_math()
        };
        let source = match class {
            SafetyClass::Unconstrained => "stdlib/ffp-prims/csrc/arith.c",
            SafetyClass::BoundarySafe => "stdlib/ffp-prims/csrc/poison_safe.c",
            SafetyClass::BoundaryUnsafe => "stdlib/ffp-prims/csrc/poison_unsafe.c",
        };
        Self {
            class,
            source: Utf8PathBuf::from(source),
            opt_level: OptLevel::Aggressive,
            lto: true,
            fast_math,
        }
    }

    /// Name of the static library the unit is compiled into.
    #[must_use]
    pub fn library(&self) -> String {
        format!("ffp_{}", self.class.unit_prefix())
    }

    /// Clang-style arguments for building this unit.
    #[must_use]
    pub fn compiler_args(&self) -> Vec<&'static str> {
        let mut args = vec![self.opt_level.compiler_arg()];
        if self.lto {
            args.push("-flto=thin");
        }
        args.extend(self.fast_math.compiler_args());
        args
    }

    /// Check the rules that concern this unit alone.
    fn check(&self) -> Vec<ContractError> {
        let mut errors = Vec::new();

        if self.source.as_str().trim().is_empty() {
            errors.push(ContractError::EmptySource(self.class));
        }

        if self.fast_math.may_produce_poison() && !self.class.tolerates_finite_math_only() {
            errors.push(ContractError::PoisonProducingUnsafeUnit(self.source.clone()));
        }

        if self.class == SafetyClass::BoundarySafe && !self.opt_level.lowers_to_selects() {
            errors.push(ContractError::UnoptimizedSafeUnit {
                unit: self.source.clone(),
                level: self.opt_level,
            });
        }

        if self.fast_math.is_strict() && self.class != SafetyClass::BoundaryUnsafe {
            warn!(
                unit = %self.source,
                class = %self.class,
                "fast-math is disabled entirely on a unit that tolerates it"
            );
        }

        errors
    }
}

/// The build configuration of all three units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Units, in declaration order.
    #[serde(default, rename = "unit")]
    pub units: Vec<UnitConfig>,
}

impl Default for BuildPlan {
    fn default() -> Self {
        Self::recommended()
    }
}

impl BuildPlan {
    /// One recommended unit per class.
    #[must_use]
    pub fn recommended() -> Self {
        Self {
            units: SafetyClass::ALL
                .iter()
                .map(|&class| UnitConfig::recommended(class))
                .collect(),
        }
    }

    /// Load a plan from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. The plan is
    /// not validated.
    pub fn load(path: impl AsRef<Utf8Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        debug!(%path, "loading build plan");
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ContractError::ConfigNotFound(path.to_path_buf())
            } else {
                ContractError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Parse a plan from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid plan document.
    pub fn parse(content: &str) -> ContractResult<Self> {
        toml::from_str(content).map_err(ContractError::Toml)
    }

    /// The first unit declared for `class`.
    #[must_use]
    pub fn unit(&self, class: SafetyClass) -> Option<&UnitConfig> {
        self.units.iter().find(|unit| unit.class == class)
    }

    /// Every rule violation in the plan, in a stable order: per-class
    /// coverage first, then per-unit checks in declaration order.
    #[must_use]
    pub fn violations(&self) -> Vec<ContractError> {
        let mut errors = Vec::new();

        for class in SafetyClass::ALL {
            match self.units.iter().filter(|unit| unit.class == class).count() {
                0 => errors.push(ContractError::MissingUnit(class)),
                1 => {}
                _ => errors.push(ContractError::DuplicateUnit(class)),
            }
        }

        for unit in &self.units {
            debug!(class = %unit.class, source = %unit.source, "checking unit");
            errors.extend(unit.check());
        }

        errors
    }

    /// Check the plan against the contract.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, see [`BuildPlan::violations`].
    pub fn validate(&self) -> ContractResult<()> {
        match self.violations().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Find the plan file in a directory or its parents.
///
/// # Errors
///
/// Returns an error if no plan is found.
pub fn find_plan(start: impl AsRef<Utf8Path>) -> ContractResult<Utf8PathBuf> {
    let start = start.as_ref();
    let mut current = Some(start);

    while let Some(dir) = current {
        let candidate = dir.join(PLAN_FILE);
        if candidate.exists() {
            return Ok(candidate);
        }
        current = dir.parent();
    }

    Err(ContractError::ConfigNotFound(start.join(PLAN_FILE)))
}
