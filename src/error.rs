//! Error types for SpGEMM

use std::fmt;

use thiserror::Error;

/// Result type alias using the crate's [`SpgemmError`]
pub type Result<T> = std::result::Result<T, SpgemmError>;

/// Which operand of a product an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Left-hand operand (A)
    Lhs,
    /// Right-hand operand (B)
    Rhs,
    /// A matrix validated on its own, outside of a product
    Matrix,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Lhs => write!(f, "left operand"),
            Operand::Rhs => write!(f, "right operand"),
            Operand::Matrix => write!(f, "matrix"),
        }
    }
}

/// Matrix axis an index belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Row index
    Row,
    /// Column index
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur while building or multiplying sparse matrices
///
/// Every failing multiplication leaves the destination matrix untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpgemmError {
    /// Inner dimensions of the operands disagree
    #[error("Dimension mismatch: cannot multiply {}×{} by {}×{}", lhs.0, lhs.1, rhs.0, rhs.1)]
    DimensionMismatch {
        /// Shape of the left operand
        lhs: (usize, usize),
        /// Shape of the right operand
        rhs: (usize, usize),
    },

    /// An index is negative or not below its declared bound
    #[error("{axis} index {index} at entry {position} of the {operand} is out of range (bound {bound})")]
    IndexOutOfRange {
        /// Matrix holding the bad entry
        operand: Operand,
        /// Axis of the bad index
        axis: Axis,
        /// Entry position within the triplet arrays
        position: usize,
        /// Offending index, rendered as a string so any index type fits
        index: String,
        /// Declared dimension along `axis`
        bound: usize,
    },

    /// The right operand's row indices are not grouped in ascending order
    #[error("Row indices of the right operand are not sorted at entry {position}")]
    UnsortedRowIndices {
        /// First entry whose row index is smaller than its predecessor's
        position: usize,
    },

    /// The three triplet arrays have different lengths
    #[error("Length mismatch: {rows} row indices, {cols} column indices, {values} values")]
    LengthMismatch {
        /// Number of row indices
        rows: usize,
        /// Number of column indices
        cols: usize,
        /// Number of values
        values: usize,
    },

    /// An entry count does not fit the index type, the address space, or the configured cap
    #[error("Capacity exceeded: {required} entries required, limit is {limit}")]
    CapacityExceeded {
        /// Number of entries that would be needed (saturated at `usize::MAX`)
        required: usize,
        /// Largest count that can be represented or allocated
        limit: usize,
    },
}
