//! Reference implementation of SpGEMM using manual multiplication
//!
//! This provides a baseline for correctness testing and performance comparison.
//! It shares no code with the expand-sort-contract pipeline.

use num_traits::Num;
use std::collections::BTreeMap;
use std::ops::AddAssign;

use crate::matrix::{IndexType, SparseMatrixCOO};

/// Performs sparse matrix multiplication using a simple algorithm as a reference implementation
///
/// Each entry A(i,k) is combined with every entry B(k,j) and accumulated in an
/// ordered map keyed by (i, j), so the output comes out canonical. The right
/// operand need not be row-sorted.
///
/// # Panics
///
/// Panics if the inner dimensions disagree.
pub fn reference_spgemm<T, I>(a: &SparseMatrixCOO<T, I>, b: &SparseMatrixCOO<T, I>) -> SparseMatrixCOO<T, I>
where
    T: Copy + Num + AddAssign,
    I: IndexType,
{
    assert_eq!(
        a.n_cols, b.n_rows,
        "Matrix dimensions must be compatible for multiplication"
    );

    // Bucket B by row so every A entry can find its partners
    let mut b_rows: Vec<Vec<(I, T)>> = vec![Vec::new(); b.n_rows];
    for (row, col, &val) in b.iter() {
        b_rows[row.index()].push((col, val));
    }

    let mut accum: BTreeMap<(I, I), T> = BTreeMap::new();
    for (i, k, &a_val) in a.iter() {
        for &(j, b_val) in &b_rows[k.index()] {
            *accum.entry((i, j)).or_insert_with(T::zero) += a_val * b_val;
        }
    }

    let mut result = SparseMatrixCOO::zeros(a.n_rows, b.n_cols);
    for ((i, j), val) in accum {
        result.row_idx.push(i);
        result.col_idx.push(j);
        result.values.push(val);
    }
    result
}
