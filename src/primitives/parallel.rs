//! # Parallel primitives
//!
//! This module provides the multi-threaded backend using Rayon's global
//! thread pool. Scans use the classic three-phase chunked scheme: scan each
//! chunk independently, scan the chunk totals, then fold each total into the
//! following chunk.

use rayon::prelude::*;
use std::ops::AddAssign;

use crate::matrix::config::SystemParameters;
use crate::primitives::{scan_in_place, Primitives};

/// Runs primitives on Rayon's thread pool
#[derive(Debug, Clone, Copy)]
pub struct Parallel {
    n_threads: usize,
    min_chunk_len: usize,
}

impl Parallel {
    /// Creates a backend splitting work across `n_threads` chunks of at least
    /// `min_chunk_len` elements
    pub fn new(n_threads: usize, min_chunk_len: usize) -> Self {
        Self {
            n_threads: n_threads.max(1),
            min_chunk_len: min_chunk_len.max(1),
        }
    }

    /// Creates a backend from tuning parameters
    pub fn from_params(params: &SystemParameters) -> Self {
        Self::new(params.n_threads, params.min_chunk_len)
    }

    /// Chunk length for splitting an input of `len` elements
    fn chunk_len(&self, len: usize) -> usize {
        let per_thread = (len + self.n_threads - 1) / self.n_threads;
        per_thread.max(self.min_chunk_len)
    }
}

impl Default for Parallel {
    fn default() -> Self {
        Self::from_params(&SystemParameters::default())
    }
}

impl Primitives for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn is_parallel(&self) -> bool {
        true
    }

    fn map<S, D, F>(&self, input: &[S], f: F) -> Vec<D>
    where
        S: Sync,
        D: Send,
        F: Fn(&S) -> D + Sync + Send,
    {
        input.par_iter().with_min_len(self.min_chunk_len).map(f).collect()
    }

    fn zip_with<A, B, D, F>(&self, lhs: &[A], rhs: &[B], f: F) -> Vec<D>
    where
        A: Sync,
        B: Sync,
        D: Send,
        F: Fn(&A, &B) -> D + Sync + Send,
    {
        assert_eq!(lhs.len(), rhs.len(), "zip_with inputs must have equal length");
        lhs.par_iter()
            .zip(rhs.par_iter())
            .with_min_len(self.min_chunk_len)
            .map(|(a, b)| f(a, b))
            .collect()
    }

    fn gather<T>(&self, map: &[usize], source: &[T]) -> Vec<T>
    where
        T: Copy + Send + Sync,
    {
        map.par_iter()
            .with_min_len(self.min_chunk_len)
            .map(|&i| source[i])
            .collect()
    }

    fn scatter_if<T>(&self, values: &[T], map: &[usize], stencil: &[usize], output: &mut [T])
    where
        T: Copy + Send + Sync,
    {
        let mut writes: Vec<(usize, T)> = values
            .par_iter()
            .zip(map.par_iter())
            .zip(stencil.par_iter())
            .with_min_len(self.min_chunk_len)
            .filter(|&(_, &flag)| flag != 0)
            .map(|((&value, &target), _)| (target, value))
            .collect();

        // Stable, so repeated targets keep their input order and the last write wins
        writes.par_sort_by_key(|&(target, _)| target);

        // Each output chunk applies the writes falling inside it
        let chunk_len = self.chunk_len(output.len());
        output
            .par_chunks_mut(chunk_len)
            .enumerate()
            .for_each(|(c, chunk)| {
                let base = c * chunk_len;
                let start = writes.partition_point(|&(target, _)| target < base);
                let end = writes.partition_point(|&(target, _)| target < base + chunk.len());
                for &(target, value) in &writes[start..end] {
                    chunk[target - base] = value;
                }
            });
    }

    fn inclusive_scan<T, F>(&self, data: &mut [T], op: F)
    where
        T: Copy + Send + Sync,
        F: Fn(T, T) -> T + Sync + Send,
    {
        let chunk_len = self.chunk_len(data.len());
        if data.len() <= chunk_len {
            scan_in_place(data, &op);
            return;
        }

        data.par_chunks_mut(chunk_len)
            .for_each(|chunk| scan_in_place(chunk, &op));

        let mut carries: Vec<T> = data
            .chunks(chunk_len)
            .filter_map(|chunk| chunk.last().copied())
            .collect();
        scan_in_place(&mut carries, &op);

        data.par_chunks_mut(chunk_len)
            .skip(1)
            .zip(carries.par_iter())
            .for_each(|(chunk, &carry)| {
                for x in chunk.iter_mut() {
                    *x = op(carry, *x);
                }
            });
    }

    fn sort_by_key<K, V>(&self, keys: &mut [K], values: &mut [V])
    where
        K: Ord + Copy + Send + Sync,
        V: Copy + Send + Sync,
    {
        assert_eq!(keys.len(), values.len(), "sort_by_key inputs must have equal length");

        let mut pairs: Vec<(K, V)> = keys
            .par_iter()
            .copied()
            .zip(values.par_iter().copied())
            .collect();
        pairs.par_sort_unstable_by_key(|&(key, _)| key);

        keys.par_iter_mut()
            .zip(values.par_iter_mut())
            .zip(pairs.par_iter())
            .for_each(|((key, value), &(k, v))| {
                *key = k;
                *value = v;
            });
    }

    fn reduce_by_key<K, V>(&self, keys: &[K], values: &[V]) -> (Vec<K>, Vec<V>)
    where
        K: Eq + Copy + Send + Sync,
        V: Copy + AddAssign + Send + Sync,
    {
        assert_eq!(keys.len(), values.len(), "reduce_by_key inputs must have equal length");

        // Start position of every run of equal keys
        let heads: Vec<usize> = (0..keys.len())
            .into_par_iter()
            .with_min_len(self.min_chunk_len)
            .filter(|&k| k == 0 || keys[k] != keys[k - 1])
            .collect();

        heads
            .par_iter()
            .enumerate()
            .map(|(run, &start)| {
                let end = heads.get(run + 1).copied().unwrap_or(keys.len());
                let mut sum = values[start];
                for &val in &values[start + 1..end] {
                    sum += val;
                }
                (keys[start], sum)
            })
            .unzip()
    }
}
