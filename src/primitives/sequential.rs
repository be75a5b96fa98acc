//! Single-threaded primitives

use std::ops::AddAssign;

use crate::primitives::{scan_in_place, Primitives};

/// Runs every primitive as a plain loop on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Primitives for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn is_parallel(&self) -> bool {
        false
    }

    fn map<S, D, F>(&self, input: &[S], f: F) -> Vec<D>
    where
        S: Sync,
        D: Send,
        F: Fn(&S) -> D + Sync + Send,
    {
        input.iter().map(f).collect()
    }

    fn zip_with<A, B, D, F>(&self, lhs: &[A], rhs: &[B], f: F) -> Vec<D>
    where
        A: Sync,
        B: Sync,
        D: Send,
        F: Fn(&A, &B) -> D + Sync + Send,
    {
        assert_eq!(lhs.len(), rhs.len(), "zip_with inputs must have equal length");
        lhs.iter().zip(rhs).map(|(a, b)| f(a, b)).collect()
    }

    fn gather<T>(&self, map: &[usize], source: &[T]) -> Vec<T>
    where
        T: Copy + Send + Sync,
    {
        map.iter().map(|&i| source[i]).collect()
    }

    fn scatter_if<T>(&self, values: &[T], map: &[usize], stencil: &[usize], output: &mut [T])
    where
        T: Copy + Send + Sync,
    {
        for ((&value, &target), &flag) in values.iter().zip(map).zip(stencil) {
            if flag != 0 {
                output[target] = value;
            }
        }
    }

    fn inclusive_scan<T, F>(&self, data: &mut [T], op: F)
    where
        T: Copy + Send + Sync,
        F: Fn(T, T) -> T + Sync + Send,
    {
        scan_in_place(data, &op);
    }

    fn sort_by_key<K, V>(&self, keys: &mut [K], values: &mut [V])
    where
        K: Ord + Copy + Send + Sync,
        V: Copy + Send + Sync,
    {
        assert_eq!(keys.len(), values.len(), "sort_by_key inputs must have equal length");

        // Sort a permutation, then apply it to both arrays
        let mut indices: Vec<usize> = (0..keys.len()).collect();
        indices.sort_unstable_by_key(|&i| keys[i]);

        let sorted_keys = self.gather(&indices, keys);
        let sorted_values = self.gather(&indices, values);
        keys.copy_from_slice(&sorted_keys);
        values.copy_from_slice(&sorted_values);
    }

    fn reduce_by_key<K, V>(&self, keys: &[K], values: &[V]) -> (Vec<K>, Vec<V>)
    where
        K: Eq + Copy + Send + Sync,
        V: Copy + AddAssign + Send + Sync,
    {
        assert_eq!(keys.len(), values.len(), "reduce_by_key inputs must have equal length");

        if keys.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let mut out_keys = Vec::new();
        let mut out_values = Vec::new();

        let mut current_key = keys[0];
        let mut current_val = values[0];

        for (&key, &val) in keys.iter().zip(values).skip(1) {
            if key == current_key {
                current_val += val;
            } else {
                out_keys.push(current_key);
                out_values.push(current_val);
                current_key = key;
                current_val = val;
            }
        }

        out_keys.push(current_key);
        out_values.push(current_val);

        (out_keys, out_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gather_and_scatter_if() {
        let p = Sequential;
        assert_eq!(p.gather(&[2, 0, 2], &[10, 20, 30]), vec![30, 10, 30]);

        let mut output = vec![0; 5];
        p.scatter_if(&[7, 8, 9], &[1, 1, 4], &[0, 3, 1], &mut output);
        assert_eq!(output, vec![0, 8, 0, 0, 9]);
    }

    #[test]
    fn test_sort_by_key_permutes_values() {
        let mut keys = vec![(1, 2), (0, 5), (1, 0), (0, 1)];
        let mut values = vec!['a', 'b', 'c', 'd'];

        Sequential.sort_by_key(&mut keys, &mut values);

        assert_eq!(keys, vec![(0, 1), (0, 5), (1, 0), (1, 2)]);
        assert_eq!(values, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn test_reduce_by_key_merges_runs() {
        let (keys, values) = Sequential.reduce_by_key(&[1, 1, 2, 3, 3, 3], &[1, 2, 3, 4, 5, 6]);
        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(values, vec![3, 3, 15]);
    }

    #[test]
    fn test_reduce_by_key_empty() {
        let (keys, values) = Sequential.reduce_by_key::<u32, f64>(&[], &[]);
        assert!(keys.is_empty());
        assert!(values.is_empty());
    }
}
