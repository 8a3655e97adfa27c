//! Timing sweeps over kernel variants
//!
//! Builds deterministic body layouts (no rand needed) and measures the
//! seconds per `step` of the sequential and parallel kernels for a range of
//! system sizes.

use std::time::Instant;

use tracing::info;

use crate::error::GravityResult;
use crate::simulation::forces::{AccelerationKernel, PairwiseGravity};
use crate::simulation::parallel::ParallelPairwiseGravity;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec;

/// One measured (size, kernel) point
#[derive(Debug, Clone, PartialEq)]
pub struct BenchRecord {
    pub n: usize,
    pub kernel: &'static str,
    pub secs_per_step: f64,
}

/// Deterministic positions for `n` bodies in `dims` dimensions
/// Spread over a box of half-width 5; no two bodies coincide for small n
pub fn make_positions(n: usize, dims: usize) -> Vec<NVec> {
    const FREQ: [f64; 3] = [0.37, 0.13, 0.07];

    (0..n)
        .map(|i| {
            let i_f = i as f64;
            NVec::from_fn(dims, |k, _| {
                let w = FREQ[k % FREQ.len()] / (1 + k / FREQ.len()) as f64;
                if k % 2 == 0 {
                    (i_f * w).sin() * 5.0
                } else {
                    (i_f * w).cos() * 5.0
                }
            })
        })
        .collect()
}

/// Time `steps` calls of `kernel.step` after one warm-up call
fn time_steps(kernel: &mut dyn AccelerationKernel, positions: &[NVec], steps: usize) -> GravityResult<f64> {
    kernel.step(positions)?;

    let t0 = Instant::now();
    for _ in 0..steps {
        kernel.step(positions)?;
    }
    Ok(t0.elapsed().as_secs_f64() / steps.max(1) as f64)
}

/// Measure the sequential and the parallel kernel for every size in `ns`
/// - unit masses, `params.dims` dimensions, `params.threads` parallel workers
pub fn bench_kernels(ns: &[usize], steps: usize, params: &Parameters) -> GravityResult<Vec<BenchRecord>> {
    params.validate()?;
    let g = params.effective_g();

    let mut records = Vec::with_capacity(ns.len() * 2);
    for &n in ns {
        let masses = vec![1.0; n];
        let positions = make_positions(n, params.dims);

        let mut direct = PairwiseGravity::new(&masses, params.dims, g);
        let dt_direct = time_steps(&mut direct, &positions, steps)?;

        let mut parallel = ParallelPairwiseGravity::new(&masses, params.dims, g, params.threads)?;
        let dt_parallel = time_steps(&mut parallel, &positions, steps)?;

        info!(
            n,
            direct_s = dt_direct,
            parallel_s = dt_parallel,
            threads = params.threads,
            "kernel timing"
        );

        records.push(BenchRecord {
            n,
            kernel: "pairwise",
            secs_per_step: dt_direct,
        });
        records.push(BenchRecord {
            n,
            kernel: "parallel",
            secs_per_step: dt_parallel,
        });
    }

    Ok(records)
}
