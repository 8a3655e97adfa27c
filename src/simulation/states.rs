//! Core state types for the pairwise kernels.
//!
//! Bodies are kept as a struct-of-arrays so that the accelerations can be
//! handed back to the caller as one contiguous slice after each step.
//! Positions are never stored here: they are borrowed per step.

use nalgebra::DVector;

/// D-dimensional vector, D fixed per kernel at construction
pub type NVec = DVector<f64>;

#[derive(Debug, Clone)]
pub struct Bodies {
    pub m: Vec<f64>,  // masses, fixed for the kernel lifetime
    pub a: Vec<NVec>, // accumulated accelerations, overwritten every step
}

impl Bodies {
    /// One body per mass, each with a zeroed `dims`-dimensional acceleration
    pub fn new(masses: &[f64], dims: usize) -> Self {
        Self {
            m: masses.to_vec(),
            a: vec![NVec::zeros(dims); masses.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }

    /// Zero every acceleration in place
    pub fn reset_accels(&mut self) {
        for a in self.a.iter_mut() {
            a.fill(0.0);
        }
    }
}
