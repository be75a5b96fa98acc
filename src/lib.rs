//! # esc-spgemm: expand-sort-contract sparse matrix multiplication
//!
//! Multiplies two sparse matrices stored as coordinate (COO) triplets and
//! produces a canonical COO result: sorted by (row, column), one entry per
//! coordinate.
//!
//! ## Algorithm Components
//!
//! 1. **Row Summary**: row offsets and lengths of the right operand.
//!
//! 2. **Output Layout**: how many partial products every left entry yields,
//!    and where they go in the intermediate stream.
//!
//! 3. **Expansion**: one triplet per partial product, built either with a
//!    nested loop or purely from scans and gathers.
//!
//! 4. **Sort-Reduce**: sort by coordinate and sum runs of equal coordinates.
//!
//! 5. **Assembly**: swap the result into the caller's matrix.
//!
//! Every stage is written against the [`Primitives`] trait, so the same
//! algorithm runs sequentially or on Rayon's thread pool.
//!
//! ## Usage
//!
//! ```
//! use esc_spgemm::{multiply, SparseMatrixCOO};
//!
//! let a = SparseMatrixCOO::<f64, u32>::identity(3);
//! let b = SparseMatrixCOO::<f64, u32>::new(3, 2, vec![0, 2], vec![1, 0], vec![5.0, 7.0]);
//! let mut c = SparseMatrixCOO::zeros(0, 0);
//!
//! multiply(&a, &b, &mut c).unwrap();
//! assert_eq!(c.shape(), (3, 2));
//! assert_eq!(c.values, vec![5.0, 7.0]);
//! ```
//!
//! A reference implementation is available for cross-checking:
//!
//! ```
//! use esc_spgemm::{reference_spgemm, spgemm, SparseMatrixCOO};
//!
//! let a = SparseMatrixCOO::<i64, usize>::new(2, 2, vec![0, 1], vec![1, 0], vec![3, 2]);
//! assert_eq!(spgemm(&a, &a).unwrap(), reference_spgemm(&a, &a));
//! ```

pub mod error;
pub mod matrix;
pub mod primitives;
pub mod spgemm;
pub mod utils;

// Re-export primary components
pub use error::{Axis, Operand, Result, SpgemmError};
pub use matrix::{multiply_dense, reference_spgemm, IndexType, SparseMatrixCOO};
pub use matrix::config::{Backend, ExpansionStrategy, SpgemmConfig, SystemParameters};
pub use primitives::{Parallel, Primitives, Sequential};
pub use spgemm::{
    check_operands, multiply, multiply_with_backend, multiply_with_config,
    offsets_from_sorted_indices, spgemm,
};
pub use utils::{from_sprs, to_sprs_csr, to_sprs_triplets};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
