//! Build ready-to-run kernel scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the body masses and the position snapshot fed to the kernel
//! - the selected kernel behind `Box<dyn AccelerationKernel>`

use crate::configuration::config::ScenarioConfig;
use crate::error::{GravityError, GravityResult};
use crate::simulation::engine::Engine;
use crate::simulation::forces::AccelerationKernel;
use crate::simulation::params::Parameters;
use crate::simulation::states::NVec;

/// Fully-initialized scenario: one kernel plus the snapshot it evaluates
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub masses: Vec<f64>,
    pub positions: Vec<NVec>,
    pub kernel: Box<dyn AccelerationKernel>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> GravityResult<Self> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dims: p_cfg.dims,
            G: p_cfg.G,
            scale_m: p_cfg.scale_m,
            scale_r: p_cfg.scale_r,
            scaled: p_cfg.scaled,
            eps2: p_cfg.eps2,
            threads: cfg.engine.threads.unwrap_or(1),
        };
        parameters.validate()?;

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            kernel: cfg.engine.kernel,
        };

        // Bodies: split into masses and the position snapshot
        let masses: Vec<f64> = cfg.bodies.iter().map(|bc| bc.m).collect();
        let mut positions = Vec::with_capacity(cfg.bodies.len());
        for (index, bc) in cfg.bodies.into_iter().enumerate() {
            if bc.x.len() != parameters.dims {
                return Err(GravityError::DimensionMismatch {
                    index,
                    expected: parameters.dims,
                    got: bc.x.len(),
                });
            }
            positions.push(NVec::from_vec(bc.x));
        }

        let kernel = engine.build_kernel(&masses, &parameters)?;

        Ok(Self {
            engine,
            parameters,
            masses,
            positions,
            kernel,
        })
    }

    /// Run the kernel once on the stored snapshot
    pub fn evaluate(&mut self) -> GravityResult<&[NVec]> {
        self.kernel.step(&self.positions)
    }
}
