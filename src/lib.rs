pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{GravityError, GravityResult};

pub use simulation::states::{Bodies, NVec};
pub use simulation::params::{Parameters, G_SI};
pub use simulation::forces::{AccelerationKernel, PairLaw, PairwiseGravity};
pub use simulation::parallel::ParallelPairwiseGravity;
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{KernelConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_kernels, make_positions, BenchRecord};
