//! # Expand-sort-contract SpGEMM
//!
//! C = A×B for COO matrices in five data-parallel stages:
//!
//! 1. **Row summary**: row offsets and lengths of B from its sorted row indices.
//! 2. **Layout**: how many partial products each A entry yields, and where
//!    they are written (exclusive prefix sum).
//! 3. **Expansion**: one (row, column, value) triplet per partial product.
//! 4. **Sort-reduce**: sort triplets by (row, column) and sum duplicates.
//! 5. **Assembly**: the compacted triplets become the new contents of C.
//!
//! The destination is only touched in the last stage, so a failing call
//! leaves it as it was.

pub mod contract;
pub mod expand;
pub mod layout;
pub mod offsets;

use num_traits::Num;
use std::ops::AddAssign;
use tracing::{debug, instrument, trace};

use crate::error::{Operand, Result, SpgemmError};
use crate::matrix::config::{Backend, ExpansionStrategy, SpgemmConfig};
use crate::matrix::{IndexType, SparseMatrixCOO};
use crate::primitives::{Parallel, Primitives, Sequential};

pub use contract::sort_reduce;
pub use expand::{expand_nested, expand_scan, Intermediate};
pub use layout::{capacity_limit, plan_output, segment_lengths, OutputLayout};
pub use offsets::{offsets_from_sorted_indices, offsets_from_sorted_indices_with, row_lengths};

/// Computes C = A×B with the default configuration, replacing the contents of `out`
///
/// B's entries must be grouped by row in ascending row order; A may be in
/// any order. The result is canonical: strictly ascending by (row, column).
///
/// # Examples
///
/// ```
/// use esc_spgemm::{multiply, SparseMatrixCOO};
///
/// // [[1, 0], [0, 2]] × [[0, 3], [4, 0]] = [[0, 3], [8, 0]]
/// let a = SparseMatrixCOO::<i32, u32>::new(2, 2, vec![0, 1], vec![0, 1], vec![1, 2]);
/// let b = SparseMatrixCOO::<i32, u32>::new(2, 2, vec![0, 1], vec![1, 0], vec![3, 4]);
/// let mut c = SparseMatrixCOO::zeros(0, 0);
///
/// multiply(&a, &b, &mut c).unwrap();
///
/// assert_eq!(c.row_idx, vec![0, 1]);
/// assert_eq!(c.col_idx, vec![1, 0]);
/// assert_eq!(c.values, vec![3, 8]);
/// ```
pub fn multiply<T, I>(
    a: &SparseMatrixCOO<T, I>,
    b: &SparseMatrixCOO<T, I>,
    out: &mut SparseMatrixCOO<T, I>,
) -> Result<()>
where
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    multiply_with_config(a, b, out, &SpgemmConfig::default())
}

/// Computes C = A×B on the backend named by `config`
pub fn multiply_with_config<T, I>(
    a: &SparseMatrixCOO<T, I>,
    b: &SparseMatrixCOO<T, I>,
    out: &mut SparseMatrixCOO<T, I>,
    config: &SpgemmConfig,
) -> Result<()>
where
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    match config.backend {
        Backend::Sequential => multiply_with_backend(&Sequential, a, b, out, config),
        Backend::Parallel => {
            let backend = Parallel::from_params(&config.system_params);
            multiply_with_backend(&backend, a, b, out, config)
        }
    }
}

/// Computes C = A×B on an explicit primitives backend
///
/// `config.backend` is ignored; everything else in `config` applies.
pub fn multiply_with_backend<P, T, I>(
    p: &P,
    a: &SparseMatrixCOO<T, I>,
    b: &SparseMatrixCOO<T, I>,
    out: &mut SparseMatrixCOO<T, I>,
    config: &SpgemmConfig,
) -> Result<()>
where
    P: Primitives,
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    let mut product = compute_product(p, a, b, config)?;
    // The previous contents are dropped with `product`
    out.swap(&mut product);
    Ok(())
}

/// Returns A×B as a new matrix, using the default configuration
pub fn spgemm<T, I>(a: &SparseMatrixCOO<T, I>, b: &SparseMatrixCOO<T, I>) -> Result<SparseMatrixCOO<T, I>>
where
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    let mut out = SparseMatrixCOO::zeros(a.n_rows, b.n_cols);
    multiply(a, b, &mut out)?;
    Ok(out)
}

/// Checks the preconditions of a product
///
/// Shapes are always checked. Index bounds of both operands and the row
/// order of B are checked when `validate` is set.
pub fn check_operands<T, I>(a: &SparseMatrixCOO<T, I>, b: &SparseMatrixCOO<T, I>, validate: bool) -> Result<()>
where
    T: Copy + Num,
    I: IndexType,
{
    if a.n_cols != b.n_rows {
        return Err(SpgemmError::DimensionMismatch {
            lhs: a.shape(),
            rhs: b.shape(),
        });
    }

    if validate {
        a.validate(Operand::Lhs)?;
        b.validate(Operand::Rhs)?;
        if let Some(position) = b.first_unsorted_row() {
            return Err(SpgemmError::UnsortedRowIndices { position });
        }
    }

    Ok(())
}

#[instrument(
    level = "debug",
    skip_all,
    fields(backend = p.name(), lhs = ?a.shape(), rhs = ?b.shape())
)]
fn compute_product<P, T, I>(
    p: &P,
    a: &SparseMatrixCOO<T, I>,
    b: &SparseMatrixCOO<T, I>,
    config: &SpgemmConfig,
) -> Result<SparseMatrixCOO<T, I>>
where
    P: Primitives,
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    check_operands(a, b, config.validate)?;

    if a.nnz() == 0 || b.nnz() == 0 {
        trace!(lhs_nnz = a.nnz(), rhs_nnz = b.nnz(), "empty operand, skipping expansion");
        return Ok(SparseMatrixCOO::zeros(a.n_rows, b.n_cols));
    }

    // Row summary of B
    let b_offsets = offsets_from_sorted_indices_with(p, &b.row_idx, b.n_rows);
    let b_row_lengths = row_lengths(p, &b_offsets);

    // Layout of the intermediate stream
    let a_cols = p.map(&a.col_idx, |col| col.index());
    let lengths = segment_lengths(p, &a_cols, &b_row_lengths);
    let limit = capacity_limit::<T, I>(config.max_intermediate);
    let layout = plan_output(p, lengths, limit)?;

    let strategy = config.expansion.resolve(p.is_parallel());
    debug!(
        lhs_nnz = a.nnz(),
        rhs_nnz = b.nnz(),
        intermediate = layout.total(),
        ?strategy,
        "expanding partial products"
    );

    let intermediate = match strategy {
        ExpansionStrategy::Scan => expand_scan(p, a, &a_cols, b, &b_offsets, &layout),
        ExpansionStrategy::NestedLoop | ExpansionStrategy::Auto => {
            expand_nested(a, b, &b_offsets, &layout)
        }
    };

    let merged = sort_reduce(p, intermediate);
    debug!(nnz = merged.len(), "contracted product");

    Ok(assemble(p, a.n_rows, b.n_cols, merged))
}

/// Splits merged keys into coordinate arrays of the product
fn assemble<P, T, I>(p: &P, n_rows: usize, n_cols: usize, merged: Intermediate<T, I>) -> SparseMatrixCOO<T, I>
where
    P: Primitives,
    T: Copy + Num,
    I: IndexType,
{
    let Intermediate { keys, values } = merged;

    SparseMatrixCOO {
        n_rows,
        n_cols,
        row_idx: p.map(&keys, |&(row, _)| row),
        col_idx: p.map(&keys, |&(_, col)| col),
        values,
    }
}
