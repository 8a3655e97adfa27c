//! High-level runtime engine settings
//!
//! Selects the kernel variant used when building a `Scenario` and
//! constructs it behind the [`AccelerationKernel`] trait

use crate::configuration::config::KernelConfig;
use crate::error::GravityResult;
use crate::simulation::forces::{AccelerationKernel, PairwiseGravity};
use crate::simulation::parallel::ParallelPairwiseGravity;
use crate::simulation::params::Parameters;

#[derive(Debug, Clone, Copy)]
pub struct Engine {
    pub kernel: KernelConfig, // pairwise, softened or parallel
}

impl Engine {
    /// Build the selected kernel for `masses` using `params`
    /// - `params` is expected to have passed [`Parameters::validate`]
    pub fn build_kernel(
        &self,
        masses: &[f64],
        params: &Parameters,
    ) -> GravityResult<Box<dyn AccelerationKernel>> {
        let g = params.effective_g();
        let kernel: Box<dyn AccelerationKernel> = match self.kernel {
            KernelConfig::Pairwise => Box::new(PairwiseGravity::new(masses, params.dims, g)),
            KernelConfig::Softened => Box::new(PairwiseGravity::with_softening(
                masses,
                params.dims,
                g,
                params.eps2,
            )),
            KernelConfig::Parallel => Box::new(ParallelPairwiseGravity::with_softening(
                masses,
                params.dims,
                g,
                params.eps2,
                params.threads,
            )?),
        };
        Ok(kernel)
    }
}
