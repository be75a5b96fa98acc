//! Row offsets and row lengths of a row-sorted COO matrix

use tracing::instrument;

use crate::matrix::IndexType;
use crate::primitives::{Primitives, Sequential};

/// Computes row offsets from row indices sorted in ascending order
///
/// Returns `n_rows + 1` monotonic offsets with `offsets[0] = 0` and
/// `offsets[n_rows] = indices.len()`; row `r` occupies
/// `offsets[r]..offsets[r + 1]`. Indices must lie in `0..n_rows`.
pub fn offsets_from_sorted_indices<I: IndexType>(indices: &[I], n_rows: usize) -> Vec<usize> {
    offsets_from_sorted_indices_with(&Sequential, indices, n_rows)
}

/// [`offsets_from_sorted_indices`] on an explicit backend
///
/// Each offset is an independent lower-bound search, so rows are processed
/// in parallel on a parallel backend.
#[instrument(level = "debug", skip_all, fields(n_rows = n_rows, nnz = indices.len()))]
pub fn offsets_from_sorted_indices_with<P, I>(p: &P, indices: &[I], n_rows: usize) -> Vec<usize>
where
    P: Primitives,
    I: IndexType,
{
    let rows: Vec<usize> = (0..=n_rows).collect();
    let mut offsets = p.map(&rows, |&r| indices.partition_point(|&i| i.index() < r));
    // Indices at or beyond n_rows would otherwise leave the tail short
    offsets[n_rows] = indices.len();
    offsets
}

/// `row_length[r] = offsets[r + 1] - offsets[r]`
pub fn row_lengths<P: Primitives>(p: &P, offsets: &[usize]) -> Vec<usize> {
    match offsets.len() {
        0 => Vec::new(),
        n => p.zip_with(&offsets[1..], &offsets[..n - 1], |&end, &start| end - start),
    }
}
