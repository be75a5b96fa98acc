//! Dense matrix multiplication
//!
//! A direct triple-nested accumulation over rectangular value grids. It has
//! none of the expansion machinery of the sparse path and mainly serves as
//! a baseline for checking sparse products.

use ndarray::Array2;
use num_traits::Num;

use crate::error::{Result, SpgemmError};

/// Computes C = A×B for dense matrices, overwriting `c`
///
/// `c` is reshaped to `(a.nrows(), b.ncols())`. On error `c` is left as it was.
pub fn multiply_dense<T>(a: &Array2<T>, b: &Array2<T>, c: &mut Array2<T>) -> Result<()>
where
    T: Copy + Num,
{
    let (n_rows, inner) = a.dim();
    let (b_rows, n_cols) = b.dim();

    if inner != b_rows {
        return Err(SpgemmError::DimensionMismatch {
            lhs: a.dim(),
            rhs: b.dim(),
        });
    }

    let mut result = Array2::zeros((n_rows, n_cols));

    for i in 0..n_rows {
        for j in 0..n_cols {
            let mut v = T::zero();
            for k in 0..inner {
                v = v + a[[i, k]] * b[[k, j]];
            }
            result[[i, j]] = v;
        }
    }

    *c = result;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dense_multiply() {
        // A = [1 2; 0 3], B = [4 5; 6 7] => C = [16 19; 18 21]
        let a = array![[1, 2], [0, 3]];
        let b = array![[4, 5], [6, 7]];
        let mut c = Array2::zeros((0, 0));

        multiply_dense(&a, &b, &mut c).unwrap();

        assert_eq!(c, array![[16, 19], [18, 21]]);
    }

    #[test]
    fn test_dense_rectangular() {
        let a = array![[1.0, 2.0, 3.0]];
        let b = array![[1.0], [1.0], [1.0]];
        let mut c = Array2::zeros((5, 5));

        multiply_dense(&a, &b, &mut c).unwrap();

        assert_eq!(c.dim(), (1, 1));
        assert!((c[[0, 0]] - 6.0f64).abs() < 1e-12);
    }

    #[test]
    fn test_dense_mismatch_keeps_destination() {
        let a = array![[1, 2]];
        let b = array![[1, 2]];
        let mut c = array![[9]];

        let err = multiply_dense(&a, &b, &mut c).unwrap_err();

        assert_eq!(err, SpgemmError::DimensionMismatch { lhs: (1, 2), rhs: (1, 2) });
        assert_eq!(c, array![[9]]);
    }
}
