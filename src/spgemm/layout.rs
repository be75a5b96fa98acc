//! Segment lengths and write offsets of the intermediate triplet stream
//!
//! Every entry A(i,j) contributes one partial product per stored entry of
//! row j of B. Counting those contributions up front fixes the size of the
//! intermediate stream before anything is allocated for it.

use std::mem::size_of;

use tracing::{debug, instrument};

use crate::error::{Result, SpgemmError};
use crate::matrix::IndexType;
use crate::primitives::Primitives;

/// Where each left-operand entry writes its partial products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Number of partial products of each A entry (size: nnz(A))
    pub segment_lengths: Vec<usize>,

    /// First write position of each A entry (size: nnz(A) + 1)
    /// output_ptr[nnz(A)] is the total number of partial products
    pub output_ptr: Vec<usize>,
}

impl OutputLayout {
    /// Total number of intermediate triplets
    pub fn total(&self) -> usize {
        self.output_ptr.last().copied().unwrap_or(0)
    }

    /// Number of left-operand entries the layout was planned for
    pub fn n_entries(&self) -> usize {
        self.segment_lengths.len()
    }
}

/// `segment_length[n] = row_length[a_cols[n]]`
pub fn segment_lengths<P: Primitives>(p: &P, a_cols: &[usize], row_lengths: &[usize]) -> Vec<usize> {
    p.gather(a_cols, row_lengths)
}

/// Largest intermediate size a product of `T` values indexed by `I` may reach
///
/// Bounded by the index type, by the number of triplets that fit in the
/// address space, and by `cap` when given.
pub fn capacity_limit<T, I: IndexType>(cap: Option<usize>) -> usize {
    let triplet_bytes = (2 * size_of::<I>() + size_of::<T>()).max(1);
    let addressable = isize::MAX as usize / triplet_bytes;
    let limit = I::max_index().min(addressable);
    cap.map_or(limit, |cap| cap.min(limit))
}

/// Prefix-sums segment lengths into write offsets
///
/// Fails with [`SpgemmError::CapacityExceeded`] if the total overflows
/// `usize` or is larger than `limit`.
#[instrument(level = "debug", skip_all, fields(entries = segment_lengths.len(), limit = limit))]
pub fn plan_output<P: Primitives>(
    p: &P,
    segment_lengths: Vec<usize>,
    limit: usize,
) -> Result<OutputLayout> {
    let output_ptr = p
        .exclusive_scan(&segment_lengths)
        .ok_or(SpgemmError::CapacityExceeded {
            required: usize::MAX,
            limit,
        })?;

    let layout = OutputLayout {
        segment_lengths,
        output_ptr,
    };

    let total = layout.total();
    if total > limit {
        return Err(SpgemmError::CapacityExceeded {
            required: total,
            limit,
        });
    }

    debug!(total, "planned intermediate layout");
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Sequential;

    #[test]
    fn test_segment_lengths_gather_row_lengths() {
        let row_lengths = vec![2, 0, 3];
        let a_cols = vec![2, 0, 1, 2];

        assert_eq!(segment_lengths(&Sequential, &a_cols, &row_lengths), vec![3, 2, 0, 3]);
    }

    #[test]
    fn test_plan_output() {
        let layout = plan_output(&Sequential, vec![3, 2, 0, 3], usize::MAX).unwrap();

        assert_eq!(layout.output_ptr, vec![0, 3, 5, 5, 8]);
        assert_eq!(layout.total(), 8);
        assert_eq!(layout.n_entries(), 4);
    }

    #[test]
    fn test_plan_output_all_empty_segments() {
        let layout = plan_output(&Sequential, vec![0, 0], usize::MAX).unwrap();
        assert_eq!(layout.output_ptr, vec![0, 0, 0]);
        assert_eq!(layout.total(), 0);
    }

    #[test]
    fn test_plan_output_over_limit() {
        let err = plan_output(&Sequential, vec![3, 2], 4).unwrap_err();
        assert_eq!(err, SpgemmError::CapacityExceeded { required: 5, limit: 4 });
    }

    #[test]
    fn test_plan_output_overflow() {
        let err = plan_output(&Sequential, vec![usize::MAX, 1], usize::MAX).unwrap_err();
        assert!(matches!(err, SpgemmError::CapacityExceeded { required: usize::MAX, .. }));
    }

    #[test]
    fn test_capacity_limit() {
        assert_eq!(capacity_limit::<f64, u32>(None), u32::MAX as usize);
        assert_eq!(capacity_limit::<f64, u32>(Some(10)), 10);
        assert_eq!(capacity_limit::<f64, usize>(None), isize::MAX as usize / 24);
        assert_eq!(capacity_limit::<i8, i32>(None), i32::MAX as usize);
    }
}
