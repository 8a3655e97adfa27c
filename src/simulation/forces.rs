//! Pairwise gravity kernels
//!
//! Defines the [`AccelerationKernel`] trait shared by every kernel variant,
//! the pair update law, and the sequential direct-summation kernel
//! [`PairwiseGravity`]. The parallel variant lives in
//! [`crate::simulation::parallel`].

use std::ops::Range;

use tracing::debug;

use crate::error::{GravityError, GravityResult};
use crate::simulation::states::{Bodies, NVec};

/// A kernel that turns a position snapshot into an acceleration snapshot
///
/// Implementations own their acceleration storage; the returned slice stays
/// valid until the next call to [`AccelerationKernel::step`], which
/// overwrites it in place.
pub trait AccelerationKernel: Send {
    /// Number of bodies, fixed at construction
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensionality of every position and acceleration vector
    fn dims(&self) -> usize;

    /// Compute the acceleration of every body for the given positions
    /// - `positions[i]` belongs to body `i` as ordered at construction
    fn step(&mut self, positions: &[NVec]) -> GravityResult<&[NVec]>;
}

/// Interaction law applied to one unordered pair of bodies
///
/// `eps2 == 0.0` is the plain Newtonian law: coincident bodies divide by
/// zero and the resulting inf/NaN flows into both accelerations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairLaw {
    pub g: f64,    // gravitational constant
    pub eps2: f64, // softening added to the squared distance
}

impl PairLaw {
    pub fn newtonian(g: f64) -> Self {
        Self { g, eps2: 0.0 }
    }

    pub fn softened(g: f64, eps2: f64) -> Self {
        Self { g, eps2 }
    }

    /// Add the mutual accelerations of bodies `i` and `j`
    /// - `delta` is scratch space of the same dimensionality as the positions
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        xi: &NVec,
        xj: &NVec,
        mi: f64,
        mj: f64,
        ai: &mut NVec,
        aj: &mut NVec,
        delta: &mut NVec,
    ) {
        let dims = delta.len();

        // Displacement from j to i
        for k in 0..dims {
            delta[k] = xi[k] - xj[k];
        }

        // Squared distance, summed in component order
        let mut d2 = 0.0;
        for k in 0..dims {
            d2 += delta[k] * delta[k];
        }
        d2 += self.eps2;

        // Unit displacement
        let inv_d = 1.0 / d2.sqrt();
        for k in 0..dims {
            delta[k] *= inv_d;
        }

        // G / d^2, scaled by the mass of the other body
        let f = self.g / d2;
        let fi = f * mj;
        let fj = f * mi;

        // i is pulled toward j (against delta), j toward i (along delta)
        for k in 0..dims {
            ai[k] -= delta[k] * fi;
        }
        for k in 0..dims {
            aj[k] += delta[k] * fj;
        }
    }
}

/// Fail fast on a snapshot that does not match the body list
pub(crate) fn check_positions(positions: &[NVec], n: usize, dims: usize) -> GravityResult<()> {
    if positions.len() != n {
        return Err(GravityError::BodyCountMismatch {
            expected: n,
            got: positions.len(),
        });
    }
    if let Some((index, x)) = positions.iter().enumerate().find(|(_, x)| x.len() != dims) {
        return Err(GravityError::DimensionMismatch {
            index,
            expected: dims,
            got: x.len(),
        });
    }
    Ok(())
}

/// Visit every pair (i, j) with i in `rows` and i < j < n
/// Outer index ascending, inner index ascending; contributions are added into `out`
pub(crate) fn accumulate_rows(
    law: &PairLaw,
    rows: Range<usize>,
    positions: &[NVec],
    masses: &[f64],
    out: &mut [NVec],
    delta: &mut NVec,
) {
    let n = masses.len();
    for i in rows {
        let xi = &positions[i];
        let mi = masses[i];

        for j in (i + 1)..n {
            // i < j, so body i sits in the head and body j starts the tail
            let (head, tail) = out.split_at_mut(j);
            law.apply(xi, &positions[j], mi, masses[j], &mut head[i], &mut tail[0], delta);
        }
    }
}

/// Direct all-pairs Newtonian gravity (sequential, O(N²))
///
/// Each unordered pair is visited once and both accelerations are updated
/// from that visit, so the pairwise forces cancel exactly. Results are
/// bit-reproducible: pairs are always enumerated with the outer index
/// ascending, then the inner index ascending.
///
/// No softening is applied by [`PairwiseGravity::new`]. Two bodies at the
/// same position produce non-finite accelerations instead of an error; use
/// [`PairwiseGravity::with_softening`] for a kernel that bounds close
/// encounters.
#[derive(Debug, Clone)]
pub struct PairwiseGravity {
    law: PairLaw,
    dims: usize,
    bodies: Bodies,
    delta: NVec,
}

impl PairwiseGravity {
    /// Create a kernel for the given masses, in body order
    pub fn new(masses: &[f64], dims: usize, g: f64) -> Self {
        Self::with_law(masses, dims, PairLaw::newtonian(g))
    }

    /// Softened variant: `eps2` is added to every squared distance
    ///
    /// This changes the physical model. With `eps2 == 0.0` it reproduces
    /// [`PairwiseGravity::new`] bit for bit.
    pub fn with_softening(masses: &[f64], dims: usize, g: f64, eps2: f64) -> Self {
        Self::with_law(masses, dims, PairLaw::softened(g, eps2))
    }

    fn with_law(masses: &[f64], dims: usize, law: PairLaw) -> Self {
        debug!(n = masses.len(), dims, g = law.g, eps2 = law.eps2, "pairwise kernel created");
        Self {
            law,
            dims,
            bodies: Bodies::new(masses, dims),
            delta: NVec::zeros(dims),
        }
    }

    pub fn g(&self) -> f64 {
        self.law.g
    }

    pub fn eps2(&self) -> f64 {
        self.law.eps2
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

    pub fn masses(&self) -> &[f64] {
        &self.bodies.m
    }

    /// Accelerations from the last step (zero before the first one)
    pub fn accelerations(&self) -> &[NVec] {
        &self.bodies.a
    }

    /// Compute accelerations for one position snapshot
    ///
    /// Returns [`GravityError::BodyCountMismatch`] or
    /// [`GravityError::DimensionMismatch`] without touching the stored
    /// accelerations when the snapshot does not fit the body list.
    pub fn step(&mut self, positions: &[NVec]) -> GravityResult<&[NVec]> {
        check_positions(positions, self.bodies.len(), self.dims)?;

        self.bodies.reset_accels();

        let n = self.bodies.len();
        let Bodies { m, a } = &mut self.bodies;
        accumulate_rows(&self.law, 0..n, positions, m, a, &mut self.delta);

        Ok(&self.bodies.a)
    }
}

impl AccelerationKernel for PairwiseGravity {
    fn len(&self) -> usize {
        PairwiseGravity::len(self)
    }

    fn dims(&self) -> usize {
        self.dims
    }

    fn step(&mut self, positions: &[NVec]) -> GravityResult<&[NVec]> {
        PairwiseGravity::step(self, positions)
    }
}
