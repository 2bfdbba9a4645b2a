//! Host-side wrappers for the FFP primitive units.
//!
//! A host compiled with fast-math must treat every float it computes as
//! possibly poison. [`Fp`] encodes the rule that keeps this sound:
//!
//! - arithmetic and the other boundary-safe operations run on the raw value;
//! - everything that branches, formats, converts, or calls the
//!   boundary-unsafe unit works on a frozen copy.
//!
//! ```
//! use ffp_host::{fp64, Fp64};
//!
//! let x = fp64(2.0);
//! let y = (x * x + 1.0).sqrt();
//! assert!(y > fp64(2.0));
//! assert_eq!(Fp64::ZERO.max(x), 2.0);
//! ```
//!
//! With the `num-traits` feature, [`Fp32`] and [`Fp64`] implement the
//! `num-traits` numeric traits, including `Float`, so they work in generic
//! numeric code.

#![warn(missing_docs)]

mod fp;
#[cfg(feature = "num-traits")]
mod num;
mod poison;

pub use fp::{fp32, fp64, Fp, Fp32, Fp64};
pub use poison::MaybePoison;

use std::num::FpCategory;

use thiserror::Error;

/// Errors raised when values enter the wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The value is infinite or NaN; carries its category.
    #[error("value is not finite ({0:?})")]
    NonFinite(FpCategory),
}

/// Result type for checked construction.
pub type ValueResult<T> = Result<T, HostError>;
