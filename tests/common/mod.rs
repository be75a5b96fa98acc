//! Shared helpers for integration tests

#![allow(dead_code)]

use esc_spgemm::{multiply_dense, SparseMatrixCOO};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Routes library spans to the test output; filter with `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create a diagonal matrix
pub fn create_diagonal_matrix(n: usize, value: f64) -> SparseMatrixCOO<f64, u32> {
    let idx: Vec<u32> = (0..n as u32).collect();
    SparseMatrixCOO::new(n, n, idx.clone(), idx, vec![value; n])
}

/// Create a tridiagonal matrix with 2 on the diagonal and 1 beside it
pub fn create_tridiagonal_matrix(n: usize) -> SparseMatrixCOO<f64, u32> {
    let mut row_idx = Vec::new();
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    for i in 0..n as u32 {
        if i > 0 {
            row_idx.push(i);
            col_idx.push(i - 1);
            values.push(1.0);
        }

        row_idx.push(i);
        col_idx.push(i);
        values.push(2.0);

        if (i as usize) < n - 1 {
            row_idx.push(i);
            col_idx.push(i + 1);
            values.push(1.0);
        }
    }

    SparseMatrixCOO::new(n, n, row_idx, col_idx, values)
}

/// Deterministic pseudo-random sparse matrix with integer values, row-sorted
///
/// Coordinates may repeat; values lie in -4..=4.
pub fn create_scattered_matrix(n_rows: usize, n_cols: usize, nnz: usize, seed: u64) -> SparseMatrixCOO<i64, u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut triplets: Vec<(u32, u32, i64)> = (0..nnz)
        .map(|_| {
            let r = rng.gen_range(0..n_rows as u32);
            let c = rng.gen_range(0..n_cols as u32);
            let v = rng.gen_range(-4i64..=4);
            (r, c, v)
        })
        .collect();
    triplets.sort_by_key(|&(r, _, _)| r);

    SparseMatrixCOO::from_triplets(n_rows, n_cols, &triplets).unwrap()
}

/// Dense product through the dense multiply path
pub fn dense_product<T>(a: &Array2<T>, b: &Array2<T>) -> Array2<T>
where
    T: Copy + num_traits::Num,
{
    let mut c = Array2::zeros((0, 0));
    multiply_dense(a, b, &mut c).unwrap();
    c
}

/// Maximum absolute difference between two dense f64 arrays of equal shape
pub fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    assert_eq!(a.dim(), b.dim());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
