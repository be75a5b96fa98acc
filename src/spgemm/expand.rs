//! Expansion of partial products into intermediate triplets
//!
//! Both strategies emit exactly one triplet per pair of an A entry (i, j, a)
//! and a B entry (j, k, b): row i, column k, value a·b. They differ only in
//! how the work is laid out, so their outputs are equal as multisets (and
//! in fact equal in order, since both follow `output_ptr`).

use num_traits::Num;
use tracing::instrument;

use crate::matrix::{IndexType, SparseMatrixCOO};
use crate::primitives::Primitives;
use crate::spgemm::layout::OutputLayout;

/// Unsorted (row, column) keys and values of every partial product
#[derive(Debug, Clone, PartialEq)]
pub struct Intermediate<T, I> {
    /// (row, column) of each partial product
    pub keys: Vec<(I, I)>,
    /// Value of each partial product
    pub values: Vec<T>,
}

impl<T, I> Intermediate<T, I> {
    /// Number of partial products
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no partial products were produced
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Walks every A entry and appends the products with its B row slice
///
/// Buffers are reserved for `layout.total()` triplets up front, so no
/// reallocation happens while appending.
#[instrument(level = "debug", skip_all, fields(total = layout.total()))]
pub fn expand_nested<T, I>(
    a: &SparseMatrixCOO<T, I>,
    b: &SparseMatrixCOO<T, I>,
    b_offsets: &[usize],
    layout: &OutputLayout,
) -> Intermediate<T, I>
where
    T: Copy + Num,
    I: IndexType,
{
    let total = layout.total();
    let mut keys = Vec::with_capacity(total);
    let mut values = Vec::with_capacity(total);

    for (n, (row, col, &a_val)) in a.iter().enumerate() {
        let start = b_offsets[col.index()];
        let end = start + layout.segment_lengths[n];

        for k in start..end {
            keys.push((row, b.col_idx[k]));
            values.push(a_val * b.values[k]);
        }
    }

    Intermediate { keys, values }
}

/// Builds the triplets with scans and gathers only
///
/// 1. Scatter each A entry index to its first write position and fill the
///    rest of its segment with a running maximum (`segments`).
/// 2. Scatter the start of the matching B row to each segment head, put 1
///    everywhere else and run a segmented sum (`gather_locations`), giving
///    the B entry each position reads.
/// 3. Gather rows and A values through `segments`, columns and B values
///    through `gather_locations`, and multiply.
///
/// `a_cols` holds A's column indices converted to `usize`.
#[instrument(level = "debug", skip_all, fields(backend = p.name(), total = layout.total()))]
pub fn expand_scan<P, T, I>(
    p: &P,
    a: &SparseMatrixCOO<T, I>,
    a_cols: &[usize],
    b: &SparseMatrixCOO<T, I>,
    b_offsets: &[usize],
    layout: &OutputLayout,
) -> Intermediate<T, I>
where
    P: Primitives,
    T: Copy + Num + Send + Sync,
    I: IndexType,
{
    let total = layout.total();
    let n_entries = layout.n_entries();
    let heads = &layout.output_ptr[..n_entries];

    // Owning A entry of every output position
    let entries: Vec<usize> = (0..n_entries).collect();
    let mut segments = vec![0usize; total];
    p.scatter_if(&entries, heads, &layout.segment_lengths, &mut segments);
    p.inclusive_scan(&mut segments, |x, y| x.max(y));

    // B entry read by every output position
    let row_starts = p.gather(a_cols, b_offsets);
    let mut gather_locations = vec![1usize; total];
    p.scatter_if(&row_starts, heads, &layout.segment_lengths, &mut gather_locations);
    p.inclusive_segmented_scan(&mut gather_locations, &segments);

    let rows = p.gather(&segments, &a.row_idx);
    let cols = p.gather(&gather_locations, &b.col_idx);
    let keys = p.zip_with(&rows, &cols, |&row, &col| (row, col));

    let a_vals = p.gather(&segments, &a.values);
    let b_vals = p.gather(&gather_locations, &b.values);
    let values = p.zip_with(&a_vals, &b_vals, |&x, &y| x * y);

    Intermediate { keys, values }
}
