//! Utilities for converting between our COO format and sprs

use num_traits::Num;
use sprs::{CsMat, TriMat};

use crate::matrix::{IndexType, SparseMatrixCOO};

/// Converts our COO matrix to an sprs triplet matrix
///
/// Duplicate coordinates are carried over; sprs sums them when compressing.
pub fn to_sprs_triplets<T, I>(matrix: &SparseMatrixCOO<T, I>) -> TriMat<T>
where
    T: Copy + Num,
    I: IndexType,
{
    TriMat::from_triplets(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_idx.iter().map(|r| r.index()).collect(),
        matrix.col_idx.iter().map(|c| c.index()).collect(),
        matrix.values.clone(),
    )
}

/// Converts our COO matrix to sprs CsMat in CSR format
pub fn to_sprs_csr<T, I>(matrix: &SparseMatrixCOO<T, I>) -> CsMat<T>
where
    T: Copy + Num + Default,
    I: IndexType,
{
    to_sprs_triplets(matrix).to_csr()
}

/// Converts an sprs CsMat to our COO format
///
/// Entries come out in row-major order, so the result is canonical.
pub fn from_sprs<T>(matrix: CsMat<T>) -> SparseMatrixCOO<T, usize>
where
    T: Copy + Num + Default,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let mut result = SparseMatrixCOO::zeros(n_rows, n_cols);

    for (&val, (row, col)) in matrix.iter() {
        result.row_idx.push(row);
        result.col_idx.push(col);
        result.values.push(val);
    }

    result
}
