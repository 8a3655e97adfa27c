//! Configuration types for loading kernel scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! benchmark scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – which kernel variant to run and with how many workers
//! - [`ParametersConfig`] – dimensionality, physical constants and unit scaling
//! - [`BodyConfig`]       – mass and initial position of each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example 2D scenario:
//!
//! ```yaml
//! engine:
//!   kernel: "pairwise"      # "pairwise", "softened" or "parallel"
//!   threads: 4              # only read by "parallel"
//!
//! parameters:
//!   dims: 2
//!   G: 1.0
//!   scaled: true            # G already in scenario units
//!   eps2: 1.0e-4            # read by "softened" and "parallel"
//!
//! bodies:
//!   - x: [ -0.5, 0.0 ]
//!     m: 1.0
//!   - x: [  0.5, 0.0 ]
//!     m: 1.0
//! ```
//!
//! Every `parameters` field is optional; missing ones take the defaults of
//! [`crate::simulation::params::Parameters`].

use serde::Deserialize;

use crate::simulation::params::G_SI;

/// Which kernel variant the scenario runs
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelConfig {
    #[default]
    #[serde(rename = "pairwise")] // Sequential all-pairs sum, no softening, bit-reproducible
    Pairwise,

    #[serde(rename = "softened")] // Sequential all-pairs sum with `eps2` added to every squared distance
    Softened,

    #[serde(rename = "parallel")] // All-pairs sum split over a worker pool, merged in fixed order, honours `eps2`
    Parallel,
}

/// Engine-level settings
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub kernel: KernelConfig, // kernel variant
    pub threads: Option<usize>, // worker count for the parallel kernel, defaults to 1
}

/// Numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub dims: usize,  // vector dimensionality
    pub G: f64,       // gravitational constant
    pub scale_m: f64, // mass unit scaling
    pub scale_r: f64, // distance unit scaling
    pub scaled: bool, // `G` is already in scaled units
    pub eps2: f64,    // softening, squared
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            dims: 3,
            G: G_SI,
            scale_m: 1.0,
            scale_r: 1.0,
            scaled: false,
            eps2: 0.0,
        }
    }
}

/// Configuration for a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // position, one entry per dimension
    pub m: f64,      // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // kernel selection
    #[serde(default)]
    pub parameters: ParametersConfig, // constants and scaling
    pub bodies: Vec<BodyConfig>, // bodies in kernel order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_example() {
        let yaml = r#"
engine:
  kernel: "parallel"
  threads: 4
parameters:
  dims: 2
  G: 1.0
  scaled: true
bodies:
  - x: [ -0.5, 0.0 ]
    m: 1.0
  - x: [ 0.5, 0.0 ]
    m: 2.0
"#;
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine.kernel, KernelConfig::Parallel);
        assert_eq!(cfg.engine.threads, Some(4));
        assert_eq!(cfg.parameters.dims, 2);
        assert!(cfg.parameters.scaled);
        assert_eq!(cfg.parameters.eps2, 0.0);
        assert_eq!(cfg.bodies.len(), 2);
        assert_eq!(cfg.bodies[1].m, 2.0);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let yaml = "bodies: []\n";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine.kernel, KernelConfig::Pairwise);
        assert_eq!(cfg.parameters.dims, 3);
        assert_eq!(cfg.parameters.G, G_SI);
        assert!(!cfg.parameters.scaled);
    }

    #[test]
    fn unknown_kernel_is_rejected() {
        let yaml = "engine:\n  kernel: \"octree\"\nbodies: []\n";
        assert!(serde_yaml::from_str::<ScenarioConfig>(yaml).is_err());
    }
}
