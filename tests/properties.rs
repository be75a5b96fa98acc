//! Property tests: the product agrees with dense multiplication and is canonical

mod common;

use common::dense_product;
use esc_spgemm::{
    multiply_with_config, reference_spgemm, spgemm, ExpansionStrategy, SparseMatrixCOO, SpgemmConfig,
};
use proptest::prelude::*;

/// Row-sorted matrix of the given shape with up to `max_nnz` entries, duplicates allowed
fn arb_matrix(n_rows: usize, n_cols: usize, max_nnz: usize) -> impl Strategy<Value = SparseMatrixCOO<i64, u32>> {
    prop::collection::vec((0..n_rows as u32, 0..n_cols as u32, -5i64..=5), 0..=max_nnz).prop_map(
        move |mut triplets| {
            triplets.sort_by_key(|&(r, _, _)| r);
            SparseMatrixCOO::from_triplets(n_rows, n_cols, &triplets).unwrap()
        },
    )
}

/// Pair of compatible operands
fn arb_operands() -> impl Strategy<Value = (SparseMatrixCOO<i64, u32>, SparseMatrixCOO<i64, u32>)> {
    (1usize..10, 1usize..10, 1usize..10)
        .prop_flat_map(|(m, k, n)| (arb_matrix(m, k, 30), arb_matrix(k, n, 30)))
}

proptest! {
    #[test]
    fn product_matches_dense((a, b) in arb_operands()) {
        let c = spgemm(&a, &b).unwrap();

        prop_assert_eq!(c.shape(), (a.n_rows, b.n_cols));
        prop_assert!(c.is_canonical());
        prop_assert_eq!(c.to_dense(), dense_product(&a.to_dense(), &b.to_dense()));
    }

    #[test]
    fn strategies_and_backends_agree((a, b) in arb_operands()) {
        let expected = reference_spgemm(&a, &b);

        for config in [
            SpgemmConfig::sequential().with_expansion(ExpansionStrategy::NestedLoop),
            SpgemmConfig::sequential().with_expansion(ExpansionStrategy::Scan),
            SpgemmConfig::parallel().with_expansion(ExpansionStrategy::NestedLoop),
            SpgemmConfig::parallel().with_expansion(ExpansionStrategy::Scan),
        ] {
            let mut c = SparseMatrixCOO::zeros(0, 0);
            multiply_with_config(&a, &b, &mut c, &config).unwrap();
            prop_assert_eq!(&c, &expected);
        }
    }

    #[test]
    fn identity_is_neutral(a in (1usize..12, 1usize..12).prop_flat_map(|(m, n)| arb_matrix(m, n, 40))) {
        let left = spgemm(&SparseMatrixCOO::identity(a.n_rows), &a).unwrap();
        let right = spgemm(&a, &SparseMatrixCOO::identity(a.n_cols)).unwrap();
        let canonical = a.sum_duplicates();

        prop_assert_eq!(&left, &canonical);
        prop_assert_eq!(&right, &canonical);
    }

    #[test]
    fn product_is_associative(
        (a, b, c) in (1usize..7, 1usize..7, 1usize..7, 1usize..7).prop_flat_map(|(m, k, l, n)| {
            (arb_matrix(m, k, 15), arb_matrix(k, l, 15), arb_matrix(l, n, 15))
        })
    ) {
        let ab_c = spgemm(&spgemm(&a, &b).unwrap(), &c).unwrap();
        let a_bc = spgemm(&a, &spgemm(&b, &c).unwrap()).unwrap();

        // Explicit zeros may differ between groupings; values may not
        prop_assert_eq!(ab_c.to_dense(), a_bc.to_dense());
    }

    #[test]
    fn row_order_of_lhs_is_irrelevant((a, b) in arb_operands()) {
        let mut reversed = a.clone();
        reversed.row_idx.reverse();
        reversed.col_idx.reverse();
        reversed.values.reverse();

        prop_assert_eq!(spgemm(&reversed, &b).unwrap(), spgemm(&a, &b).unwrap());
    }
}
