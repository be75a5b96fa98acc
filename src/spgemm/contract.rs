//! Sort-reduce of intermediate triplets
//!
//! Sorting by (row, column) brings all partial products of an output entry
//! next to each other; a run-length reduction then sums each run. Equal keys
//! may end up in any relative order, so floating-point sums can differ in
//! the last bits between backends. Integer sums are exact.

use num_traits::Num;
use std::ops::AddAssign;
use tracing::instrument;

use crate::matrix::{IndexType, SparseMatrixCOO};
use crate::primitives::{Primitives, Sequential};
use crate::spgemm::expand::Intermediate;

/// Sorts the intermediate stream and merges entries sharing a coordinate
///
/// The returned keys are strictly ascending.
#[instrument(level = "debug", skip_all, fields(backend = p.name(), len = intermediate.len()))]
pub fn sort_reduce<P, T, I>(p: &P, intermediate: Intermediate<T, I>) -> Intermediate<T, I>
where
    P: Primitives,
    T: Copy + AddAssign + Send + Sync,
    I: IndexType,
{
    let Intermediate {
        mut keys,
        mut values,
    } = intermediate;

    p.sort_by_key(&mut keys, &mut values);
    let (keys, values) = p.reduce_by_key(&keys, &values);

    Intermediate { keys, values }
}

impl<T, I> SparseMatrixCOO<T, I>
where
    T: Copy + Num + AddAssign + Send + Sync,
    I: IndexType,
{
    /// Returns a canonical copy: sorted by (row, column), duplicates summed
    pub fn sum_duplicates(&self) -> Self {
        let p = Sequential;
        let keys = p.zip_with(&self.row_idx, &self.col_idx, |&row, &col| (row, col));
        let merged = sort_reduce(
            &p,
            Intermediate {
                keys,
                values: self.values.clone(),
            },
        );

        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols,
            row_idx: p.map(&merged.keys, |&(row, _)| row),
            col_idx: p.map(&merged.keys, |&(_, col)| col),
            values: merged.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Parallel;

    fn sample() -> Intermediate<i32, u32> {
        Intermediate {
            keys: vec![(1, 0), (0, 2), (1, 0), (0, 0), (0, 2), (1, 1)],
            values: vec![1, 2, 3, 4, 5, 6],
        }
    }

    #[test]
    fn test_sort_reduce_sequential() {
        let merged = sort_reduce(&Sequential, sample());

        assert_eq!(merged.keys, vec![(0, 0), (0, 2), (1, 0), (1, 1)]);
        assert_eq!(merged.values, vec![4, 7, 4, 6]);
    }

    #[test]
    fn test_sort_reduce_parallel() {
        let merged = sort_reduce(&Parallel::new(4, 1), sample());

        assert_eq!(merged.keys, vec![(0, 0), (0, 2), (1, 0), (1, 1)]);
        assert_eq!(merged.values, vec![4, 7, 4, 6]);
    }

    #[test]
    fn test_sort_reduce_empty() {
        let merged = sort_reduce(
            &Sequential,
            Intermediate::<f64, usize> {
                keys: Vec::new(),
                values: Vec::new(),
            },
        );
        assert!(merged.is_empty());
    }

    #[test]
    fn test_sum_duplicates() {
        let m = SparseMatrixCOO::<i32, usize>::new(2, 3, vec![1, 0, 1, 0], vec![2, 1, 2, 0], vec![1, 2, 3, 4]);
        let c = m.sum_duplicates();

        assert!(c.is_canonical());
        assert_eq!(c.row_idx, vec![0, 0, 1]);
        assert_eq!(c.col_idx, vec![0, 1, 2]);
        assert_eq!(c.values, vec![4, 2, 4]);
        assert_eq!(c.to_dense(), m.to_dense());
    }
}
