//! Possibly-poison values and freezing.

use core::hint;
use core::mem::MaybeUninit;

use ffp_prims::Float;

/// A float that may be poison.
///
/// Any result of fast-math arithmetic is treated as possibly poison: an
/// operation given NaN or infinity under `finite-math-only` does not
/// produce a number, and the compiler may assume whatever it likes about
/// it. Such a value can flow through arithmetic, but must be frozen before
/// anything branches on it or hands it to code that does.
#[derive(Copy)]
#[repr(transparent)]
pub struct MaybePoison<F>(MaybeUninit<F>);

// `MaybeUninit<F>` is only `Clone` for `F: Copy`, which the derive would not
// require.
impl<F: Copy> Clone for MaybePoison<F> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Float> MaybePoison<F> {
    /// Wrap a concrete value.
    #[inline(always)]
    pub const fn new(value: F) -> Self {
        Self(MaybeUninit::new(value))
    }

    /// Read the value without freezing it.
    ///
    /// Reads of copies of the same poison value may disagree, and anything
    /// computed from a poison value is itself poison.
    ///
    /// # Safety
    ///
    /// The result must only reach operations that are defined for every
    /// input, such as IEEE arithmetic or the boundary-safe unit. Using it as
    /// a branch condition, or passing it to the boundary-unsafe unit, is
    /// undefined behavior.
    #[inline(always)]
    pub unsafe fn maybe_poison(self) -> F {
        // SAFETY: only `new` constructs this type, so the bytes are
        // initialized; `F` is valid for every bit pattern.
        unsafe { self.0.assume_init() }
    }

    /// Force a concrete value.
    ///
    /// A value that was never poison is returned unchanged. A poison value
    /// becomes some arbitrary but fixed number.
    #[inline(always)]
    pub fn freeze(self) -> F {
        // SAFETY: as in `maybe_poison`; the optimization barrier keeps
        // assumptions about the poison value from crossing into the result.
        hint::black_box(unsafe { self.0.assume_init() })
    }
}

impl<F: Float> From<F> for MaybePoison<F> {
    #[inline(always)]
    fn from(value: F) -> Self {
        Self::new(value)
    }
}
