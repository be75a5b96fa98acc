//! Index types usable for the coordinate arrays of a sparse matrix

use std::fmt;

use num_traits::{NumCast, PrimInt};

/// Integer type storing row and column coordinates
///
/// Implemented for the primitive integers a sparse matrix is commonly
/// indexed with. Signed types are accepted so that data produced by other
/// libraries can be multiplied directly; negative coordinates are rejected
/// by validation.
pub trait IndexType: PrimInt + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Converts to `usize`
    ///
    /// Values that have no `usize` representation (negative numbers) map to
    /// `usize::MAX`, which is never a valid position.
    #[inline]
    fn index(self) -> usize {
        self.to_usize().unwrap_or(usize::MAX)
    }

    /// Converts from `usize`, returning `None` if `value` does not fit
    #[inline]
    fn from_index(value: usize) -> Option<Self> {
        <Self as NumCast>::from(value)
    }

    /// Largest count representable by this type, clamped to `usize`
    #[inline]
    fn max_index() -> usize {
        Self::max_value().to_usize().unwrap_or(usize::MAX)
    }
}

impl IndexType for u32 {}
impl IndexType for u64 {}
impl IndexType for usize {}
impl IndexType for i32 {}
impl IndexType for i64 {}
