//! Data-parallel primitives the SpGEMM pipeline is written against
//!
//! The multiplication is expressed entirely in terms of a handful of
//! bulk operations (map, gather, scatter, scans, sort-by-key and
//! reduce-by-key). Each backend decides how those run: [`Sequential`]
//! uses plain loops, [`Parallel`] splits the work over Rayon's thread pool.
//! Both produce identical results for exact value types.

pub mod parallel;
pub mod sequential;

use std::ops::AddAssign;

pub use parallel::Parallel;
pub use sequential::Sequential;

/// Bulk operations over slices
///
/// Every operation reads only its inputs and writes disjoint output
/// positions, so implementations are free to split work arbitrarily.
pub trait Primitives: Sync {
    /// Short backend name, used in tracing spans
    fn name(&self) -> &'static str;

    /// Whether work is spread over more than the calling thread
    fn is_parallel(&self) -> bool;

    /// `out[i] = f(&input[i])`
    fn map<S, D, F>(&self, input: &[S], f: F) -> Vec<D>
    where
        S: Sync,
        D: Send,
        F: Fn(&S) -> D + Sync + Send;

    /// `out[i] = f(&lhs[i], &rhs[i])`
    ///
    /// # Panics
    ///
    /// Panics if the inputs differ in length.
    fn zip_with<A, B, D, F>(&self, lhs: &[A], rhs: &[B], f: F) -> Vec<D>
    where
        A: Sync,
        B: Sync,
        D: Send,
        F: Fn(&A, &B) -> D + Sync + Send;

    /// `out[i] = source[map[i]]`
    fn gather<T>(&self, map: &[usize], source: &[T]) -> Vec<T>
    where
        T: Copy + Send + Sync;

    /// `output[map[i]] = values[i]` for every `i` with `stencil[i] != 0`
    fn scatter_if<T>(&self, values: &[T], map: &[usize], stencil: &[usize], output: &mut [T])
    where
        T: Copy + Send + Sync;

    /// In-place inclusive scan under an associative operator
    fn inclusive_scan<T, F>(&self, data: &mut [T], op: F)
    where
        T: Copy + Send + Sync,
        F: Fn(T, T) -> T + Sync + Send;

    /// Sorts `keys` ascending, permuting `values` alongside
    ///
    /// The relative order of equal keys is unspecified.
    fn sort_by_key<K, V>(&self, keys: &mut [K], values: &mut [V])
    where
        K: Ord + Copy + Send + Sync,
        V: Copy + Send + Sync;

    /// Collapses every run of equal adjacent keys into one entry whose
    /// value is the sum of the run
    fn reduce_by_key<K, V>(&self, keys: &[K], values: &[V]) -> (Vec<K>, Vec<V>)
    where
        K: Eq + Copy + Send + Sync,
        V: Copy + AddAssign + Send + Sync;

    /// Exclusive prefix sum with the total appended
    ///
    /// Returns `input.len() + 1` elements: `out[0] = 0`, `out[i]` is the sum
    /// of `input[..i]`, and the last element is the sum of all of `input`.
    /// Returns `None` if that total overflows `usize`.
    fn exclusive_scan(&self, input: &[usize]) -> Option<Vec<usize>> {
        input.iter().try_fold(0usize, |acc, &x| acc.checked_add(x))?;

        let mut out = Vec::with_capacity(input.len() + 1);
        out.push(0);
        out.extend_from_slice(input);
        self.inclusive_scan(&mut out, |a, b| a + b);
        Some(out)
    }

    /// Inclusive sum that restarts wherever the segment id changes
    ///
    /// `segments` must be non-decreasing, so that equal ids are contiguous.
    fn inclusive_segmented_scan(&self, data: &mut [usize], segments: &[usize]) {
        let mut pairs = self.zip_with(segments, &*data, |&segment, &value| (segment, value));
        self.inclusive_scan(&mut pairs, |(s1, v1), (s2, v2)| {
            if s1 == s2 {
                (s2, v1 + v2)
            } else {
                (s2, v2)
            }
        });
        let scanned = self.map(&pairs, |&(_, value)| value);
        data.copy_from_slice(&scanned);
    }
}

/// Sequential inclusive scan shared by both backends
pub(crate) fn scan_in_place<T, F>(data: &mut [T], op: &F)
where
    T: Copy,
    F: Fn(T, T) -> T,
{
    for i in 1..data.len() {
        data[i] = op(data[i - 1], data[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_backend<P: Primitives>(p: &P) {
        assert_eq!(p.exclusive_scan(&[1, 2, 3, 4]), Some(vec![0, 1, 3, 6, 10]));
        assert_eq!(p.exclusive_scan(&[0, 0, 5, 0]), Some(vec![0, 0, 0, 5, 5]));
        assert_eq!(p.exclusive_scan(&[]), Some(vec![0]));
        assert_eq!(p.exclusive_scan(&[usize::MAX, 1]), None);

        let mut data = vec![1, 1, 1, 1, 1, 1];
        p.inclusive_segmented_scan(&mut data, &[0, 0, 2, 2, 2, 5]);
        assert_eq!(data, vec![1, 2, 1, 2, 3, 1]);

        let mut owners = vec![0, 0, 3, 0, 0, 4];
        p.inclusive_scan(&mut owners, |a: usize, b: usize| a.max(b));
        assert_eq!(owners, vec![0, 0, 3, 3, 3, 4]);
    }

    #[test]
    fn test_sequential_defaults() {
        check_backend(&Sequential);
    }

    #[test]
    fn test_parallel_defaults() {
        // Tiny chunks force the multi-chunk code paths
        check_backend(&Parallel::new(4, 1));
    }
}
