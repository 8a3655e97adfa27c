//! Numerical and physical parameters for a kernel
//!
//! `Parameters` holds runtime settings:
//! - dimensionality of every position/acceleration vector (`dims`),
//! - gravitational constant and the unit scaling applied to it,
//! - softening (`eps2`) for the softened and parallel kernels,
//! - worker count for the parallel kernel

use crate::error::{GravityError, GravityResult};

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const G_SI: f64 = 6.6740831e-11;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dims: usize,    // vector dimensionality D
    pub G: f64,         // gravitational constant, unscaled
    pub scale_m: f64,   // mass unit scaling (for kg)
    pub scale_r: f64,   // distance unit scaling (for m)
    pub scaled: bool,   // `G` is already expressed in scaled units
    pub eps2: f64,      // softening, read by the softened and parallel kernels
    pub threads: usize, // workers, only read by the parallel kernel
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            dims: 3,
            G: G_SI,
            scale_m: 1.0,
            scale_r: 1.0,
            scaled: false,
            eps2: 0.0,
            threads: 1,
        }
    }
}

impl Parameters {
    /// Gravitational constant in the scaled mass/distance units
    ///
    /// `G * scale_r³ / scale_m`, or `G` untouched when `scaled` is set.
    pub fn effective_g(&self) -> f64 {
        if self.scaled {
            self.G
        } else {
            self.G * self.scale_r.powi(3) / self.scale_m
        }
    }

    /// Reject settings no kernel can run with
    pub fn validate(&self) -> GravityResult<()> {
        if self.dims == 0 {
            return Err(GravityError::invalid_params("dims must be at least 1"));
        }
        if !(self.G.is_finite() && self.G > 0.0) {
            return Err(GravityError::invalid_params(format!(
                "G must be finite and positive, got {}",
                self.G
            )));
        }
        if !(self.scale_m.is_finite() && self.scale_m > 0.0) {
            return Err(GravityError::invalid_params(format!(
                "scale_m must be finite and positive, got {}",
                self.scale_m
            )));
        }
        if !(self.scale_r.is_finite() && self.scale_r > 0.0) {
            return Err(GravityError::invalid_params(format!(
                "scale_r must be finite and positive, got {}",
                self.scale_r
            )));
        }
        if !(self.eps2.is_finite() && self.eps2 >= 0.0) {
            return Err(GravityError::invalid_params(format!(
                "eps2 must be finite and non-negative, got {}",
                self.eps2
            )));
        }
        if self.threads == 0 {
            return Err(GravityError::invalid_params("threads must be at least 1"));
        }
        Ok(())
    }
}
