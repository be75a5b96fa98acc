//! Coordinate (COO) sparse matrix format implementation

use std::fmt;

use ndarray::Array2;
use num_traits::Num;

use crate::error::{Axis, Operand, Result, SpgemmError};
use crate::matrix::index::IndexType;

/// A sparse matrix in coordinate (COO) format
///
/// The COO format stores a sparse matrix as three parallel arrays:
/// - row_idx: row coordinate of every stored entry
/// - col_idx: column coordinate of every stored entry
/// - values: value of every stored entry
///
/// No ordering is imposed on general matrices. Products computed by this
/// crate are canonical: sorted by (row, column) with no repeated coordinate
/// (see [`SparseMatrixCOO::is_canonical`]).
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCOO<T, I = usize> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row indices (size: nnz)
    pub row_idx: Vec<I>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<I>,

    /// Stored values (size: nnz)
    pub values: Vec<T>,
}

impl<T, I> SparseMatrixCOO<T, I>
where
    T: Copy + Num,
    I: IndexType,
{
    /// Creates a new COO matrix with the given dimensions and triplets
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_idx, col_idx and values must have equal length
    /// - every index must be below its dimension
    ///
    /// Use [`SparseMatrixCOO::try_new`] for a fallible version.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_idx: Vec<I>,
        col_idx: Vec<I>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_idx.len(), values.len(), "row_idx.len() must equal values.len()");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");

        for &row in &row_idx {
            assert!(row.index() < n_rows, "Row index {} out of bounds (n_rows = {})", row, n_rows);
        }
        for &col in &col_idx {
            assert!(col.index() < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        }
    }

    /// Creates a new COO matrix, reporting inconsistent input as an error
    pub fn try_new(
        n_rows: usize,
        n_cols: usize,
        row_idx: Vec<I>,
        col_idx: Vec<I>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_idx.len() != values.len() || col_idx.len() != values.len() {
            return Err(SpgemmError::LengthMismatch {
                rows: row_idx.len(),
                cols: col_idx.len(),
                values: values.len(),
            });
        }

        let matrix = Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        };
        matrix.validate(Operand::Matrix)?;
        Ok(matrix)
    }

    /// Builds a matrix from `(row, col, value)` triplets
    pub fn from_triplets(n_rows: usize, n_cols: usize, triplets: &[(I, I, T)]) -> Result<Self> {
        let row_idx = triplets.iter().map(|&(r, _, _)| r).collect();
        let col_idx = triplets.iter().map(|&(_, c, _)| c).collect();
        let values = triplets.iter().map(|&(_, _, v)| v).collect();
        Self::try_new(n_rows, n_cols, row_idx, col_idx, values)
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_idx: Vec::new(),
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    ///
    /// # Panics
    ///
    /// Panics if `n` is not representable by the index type.
    pub fn identity(n: usize) -> Self {
        assert!(n <= I::max_index(), "Identity size {} exceeds the index type", n);

        let diagonal: Vec<I> = (0..n).filter_map(I::from_index).collect();

        Self {
            n_rows: n,
            n_cols: n,
            row_idx: diagonal.clone(),
            col_idx: diagonal,
            values: vec![T::one(); n],
        }
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Returns an iterator over the stored `(row, col, value)` triplets
    pub fn iter(&self) -> impl Iterator<Item = (I, I, &T)> {
        self.row_idx
            .iter()
            .zip(&self.col_idx)
            .zip(&self.values)
            .map(|((&row, &col), val)| (row, col, val))
    }

    /// Changes the dimensions and the number of stored entries
    ///
    /// Existing entries are kept up to `nnz`; new slots are zero-filled at
    /// coordinate (0, 0).
    pub fn resize(&mut self, n_rows: usize, n_cols: usize, nnz: usize) {
        self.n_rows = n_rows;
        self.n_cols = n_cols;
        self.row_idx.resize(nnz, I::zero());
        self.col_idx.resize(nnz, I::zero());
        self.values.resize(nnz, T::zero());
    }

    /// Exchanges the contents of two matrices
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Checks that array lengths agree and every index is within bounds
    pub fn validate(&self, operand: Operand) -> Result<()> {
        if self.row_idx.len() != self.values.len() || self.col_idx.len() != self.values.len() {
            return Err(SpgemmError::LengthMismatch {
                rows: self.row_idx.len(),
                cols: self.col_idx.len(),
                values: self.values.len(),
            });
        }

        let axes = [
            (Axis::Row, &self.row_idx, self.n_rows),
            (Axis::Column, &self.col_idx, self.n_cols),
        ];
        for (axis, indices, bound) in axes {
            if let Some(position) = indices.iter().position(|&i| i.index() >= bound) {
                return Err(SpgemmError::IndexOutOfRange {
                    operand,
                    axis,
                    position,
                    index: indices[position].to_string(),
                    bound,
                });
            }
        }

        Ok(())
    }

    /// Returns the first position whose row index is smaller than the previous one
    pub fn first_unsorted_row(&self) -> Option<usize> {
        self.row_idx
            .windows(2)
            .position(|w| w[1] < w[0])
            .map(|p| p + 1)
    }

    /// Returns true if entries are grouped by row in ascending row order
    pub fn is_row_sorted(&self) -> bool {
        self.first_unsorted_row().is_none()
    }

    /// Returns true if entries are strictly ascending by (row, column)
    pub fn is_canonical(&self) -> bool {
        (1..self.nnz()).all(|k| {
            (self.row_idx[k - 1], self.col_idx[k - 1]) < (self.row_idx[k], self.col_idx[k])
        })
    }

    /// Converts to a dense array, summing entries that share a coordinate
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::zeros((self.n_rows, self.n_cols));
        for (row, col, &val) in self.iter() {
            let cell = &mut dense[[row.index(), col.index()]];
            *cell = *cell + val;
        }
        dense
    }

    /// Collects the nonzero entries of a dense array in row-major order
    ///
    /// # Panics
    ///
    /// Panics if a dimension of `dense` is not representable by the index type.
    pub fn from_dense(dense: &Array2<T>) -> Self {
        let (n_rows, n_cols) = dense.dim();
        assert!(
            n_rows <= I::max_index() && n_cols <= I::max_index(),
            "Dense shape {}×{} exceeds the index type",
            n_rows,
            n_cols
        );

        let mut row_idx = Vec::new();
        let mut col_idx = Vec::new();
        let mut values = Vec::new();

        for ((i, j), &val) in dense.indexed_iter() {
            if val.is_zero() {
                continue;
            }
            if let (Some(row), Some(col)) = (I::from_index(i), I::from_index(j)) {
                row_idx.push(row);
                col_idx.push(col);
                values.push(val);
            }
        }

        Self {
            n_rows,
            n_cols,
            row_idx,
            col_idx,
            values,
        }
    }
}

impl<T: fmt::Debug, I: fmt::Debug> fmt::Debug for SparseMatrixCOO<T, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCOO {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.values.len())?;

        let max_entries = 10.min(self.values.len());
        if max_entries > 0 {
            writeln!(f, "  content sample:")?;
            for k in 0..max_entries {
                writeln!(
                    f,
                    "    ({:?}, {:?}) = {:?}",
                    self.row_idx[k], self.col_idx[k], self.values[k]
                )?;
            }
            if self.values.len() > max_entries {
                writeln!(f, "    ... ({} more)", self.values.len() - max_entries)?;
            }
        }

        write!(f, "}}")
    }
}
