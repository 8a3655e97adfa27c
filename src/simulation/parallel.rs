//! Multi-threaded direct-summation kernel
//!
//! The outer pair index is split into contiguous row ranges of roughly
//! equal pair count. Every range runs the same pair update as
//! [`PairwiseGravity`](crate::simulation::forces::PairwiseGravity) into its
//! own partial accumulator on a dedicated `rayon` pool, and the partials are
//! summed into the output in ascending range order.
//!
//! The merge order is fixed, so a given thread count always produces the
//! same bits. Different thread counts round differently from each other and
//! from the sequential kernel.

use std::ops::Range;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::{GravityError, GravityResult};
use crate::simulation::forces::{accumulate_rows, check_positions, AccelerationKernel, PairLaw};
use crate::simulation::states::{Bodies, NVec};

/// Per-worker accumulator and displacement scratch
struct Partial {
    a: Vec<NVec>,
    delta: NVec,
}

/// Direct all-pairs Newtonian gravity spread over a fixed worker pool
pub struct ParallelPairwiseGravity {
    law: PairLaw,
    dims: usize,
    bodies: Bodies,
    rows: Vec<Range<usize>>,
    partials: Vec<Partial>,
    pool: ThreadPool,
}

impl ParallelPairwiseGravity {
    /// Create a kernel with `threads` workers
    /// - fails with [`GravityError::InvalidParameters`] when `threads == 0`
    pub fn new(masses: &[f64], dims: usize, g: f64, threads: usize) -> GravityResult<Self> {
        Self::with_law(masses, dims, PairLaw::newtonian(g), threads)
    }

    /// Softened variant: `eps2` is added to every squared distance
    /// - `eps2 == 0.0` gives the same kernel as [`ParallelPairwiseGravity::new`]
    pub fn with_softening(
        masses: &[f64],
        dims: usize,
        g: f64,
        eps2: f64,
        threads: usize,
    ) -> GravityResult<Self> {
        Self::with_law(masses, dims, PairLaw::softened(g, eps2), threads)
    }

    fn with_law(masses: &[f64], dims: usize, law: PairLaw, threads: usize) -> GravityResult<Self> {
        if threads == 0 {
            return Err(GravityError::invalid_params("threads must be at least 1"));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| GravityError::ThreadPool(e.to_string()))?;

        let rows = partition_rows(masses.len(), threads);
        let partials = rows
            .iter()
            .map(|_| Partial {
                a: vec![NVec::zeros(dims); masses.len()],
                delta: NVec::zeros(dims),
            })
            .collect();

        debug!(
            n = masses.len(),
            dims,
            g = law.g,
            eps2 = law.eps2,
            threads,
            "parallel pairwise kernel created"
        );

        Ok(Self {
            law,
            dims,
            bodies: Bodies::new(masses, dims),
            rows,
            partials,
            pool,
        })
    }

    pub fn g(&self) -> f64 {
        self.law.g
    }

    pub fn eps2(&self) -> f64 {
        self.law.eps2
    }

    pub fn threads(&self) -> usize {
        self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Compute accelerations for one position snapshot
    pub fn step(&mut self, positions: &[NVec]) -> GravityResult<&[NVec]> {
        check_positions(positions, self.bodies.len(), self.dims)?;

        let law = self.law;
        let masses = &self.bodies.m;
        let rows = &self.rows;
        let partials = &mut self.partials;

        self.pool.install(|| {
            partials
                .par_iter_mut()
                .zip(rows.par_iter())
                .for_each(|(partial, range)| {
                    for a in partial.a.iter_mut() {
                        a.fill(0.0);
                    }
                    accumulate_rows(
                        &law,
                        range.clone(),
                        positions,
                        masses,
                        &mut partial.a,
                        &mut partial.delta,
                    );
                });
        });

        // Fixed merge order: range 0 first
        self.bodies.reset_accels();
        for partial in &self.partials {
            for (a, pa) in self.bodies.a.iter_mut().zip(partial.a.iter()) {
                *a += pa;
            }
        }

        Ok(&self.bodies.a)
    }
}

impl AccelerationKernel for ParallelPairwiseGravity {
    fn len(&self) -> usize {
        ParallelPairwiseGravity::len(self)
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn step(&mut self, positions: &[NVec]) -> GravityResult<&[NVec]> {
        ParallelPairwiseGravity::step(self, positions)
    }
}

/// Split rows `0..n` into `parts` contiguous ranges of similar pair count
///
/// Row `i` owns the `n - 1 - i` pairs `(i, j > i)`, so early rows are
/// heavier. Ranges may be empty when there are fewer rows than parts.
pub(crate) fn partition_rows(n: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let total = n * n.saturating_sub(1) / 2;

    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    let mut row = 0;
    let mut done = 0;

    for k in 1..=parts {
        let target = pair_target(total, k, parts);
        while row < n && done < target {
            done += n - 1 - row;
            row += 1;
        }
        if k == parts {
            row = n;
        }
        ranges.push(start..row);
        start = row;
    }

    ranges
}

/// Cumulative pair count `total * k / parts` at the end of range `k`
/// Widened to u128 so the product cannot overflow `usize` on 32-bit targets
fn pair_target(total: usize, k: usize, parts: usize) -> usize {
    (total as u128 * k as u128 / parts as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs_in(n: usize, r: &Range<usize>) -> usize {
        r.clone().map(|i| n - 1 - i).sum()
    }

    #[test]
    fn partition_covers_all_rows_in_order() {
        for n in [0, 1, 2, 7, 100] {
            for parts in [1, 2, 3, 8] {
                let ranges = partition_rows(n, parts);
                assert_eq!(ranges.len(), parts);
                assert_eq!(ranges[0].start, 0);
                assert_eq!(ranges[parts - 1].end, n);
                for w in ranges.windows(2) {
                    assert_eq!(w[0].end, w[1].start);
                }
            }
        }
    }

    #[test]
    fn partition_balances_pair_count() {
        let n = 1000;
        let ranges = partition_rows(n, 4);
        let total = n * (n - 1) / 2;
        for r in &ranges {
            let share = pairs_in(n, r) as f64 / total as f64;
            assert!((share - 0.25).abs() < 0.01, "unbalanced share {share}");
        }
    }

    #[test]
    fn pair_target_does_not_overflow() {
        assert_eq!(pair_target(usize::MAX, 3, 3), usize::MAX);
        assert_eq!(pair_target(usize::MAX, 1, 2), usize::MAX / 2);
        assert_eq!(pair_target(usize::MAX - 1, 7, 8), ((usize::MAX - 1) as u128 * 7 / 8) as usize);
        assert_eq!(pair_target(10, 1, 4), 2);
    }

    #[test]
    fn partition_single_part_is_everything() {
        assert_eq!(partition_rows(5, 1), vec![0..5]);
        assert_eq!(partition_rows(5, 0), vec![0..5]);
    }
}
