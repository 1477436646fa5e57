//! Force contributors for the integrator
//!
//! Defines the [`Force`] trait, the [`ForceSet`] that sums several terms, and
//! the pairwise Newtonian attraction used by every scenario

use crate::simulation::states::{Body, NVec2};

/// Collection of force terms
/// Each term implements [`Force`] and their contributions are summed
/// into a single force vector per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Total force on `bodies[i]` from all terms, using the positions in
    /// `bodies` as they are right now
    pub fn total_force(&self, i: usize, bodies: &[Body]) -> NVec2 {
        self.terms
            .iter()
            .fold(NVec2::zeros(), |acc, term| acc + term.force_on(i, bodies))
    }

    /// Compute total forces for every body from one consistent snapshot
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[Body], out: &mut [NVec2]) {
        for (i, f) in out.iter_mut().enumerate().take(bodies.len()) {
            *f = self.total_force(i, bodies);
        }
    }
}

/// A force source acting on one body of a registry
pub trait Force {
    /// Force on `bodies[i]` from this term. Implementations must skip slot
    /// `i` itself.
    fn force_on(&self, i: usize, bodies: &[Body]) -> NVec2;
}

/// Pairwise Newtonian attraction with a hard minimum-distance cutoff
///
/// Pairs closer than `distance_threshold` contribute nothing. This keeps the
/// force finite when two bodies nearly coincide and stops them jittering
/// around each other; it is an approximation, not a physical law.
#[allow(non_snake_case)]
pub struct NewtonianAttraction {
    pub G: f64, // gravitational constant
    pub distance_threshold: f64,
}

impl NewtonianAttraction {
    /// Force on a body at `xa` with mass `ma` from a body at `xb` with mass `mb`.
    /// Points from a toward b.
    pub fn pair_force(&self, xa: NVec2, ma: f64, xb: NVec2, mb: f64) -> NVec2 {
        let dx = xb.x - xa.x;
        let dy = xb.y - xa.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= self.distance_threshold {
            return NVec2::zeros();
        }

        let magnitude = self.G * ma * mb / (dist * dist);
        let theta = dy.atan2(dx);

        NVec2::new(theta.cos() * magnitude, theta.sin() * magnitude)
    }
}

impl Force for NewtonianAttraction {
    fn force_on(&self, i: usize, bodies: &[Body]) -> NVec2 {
        let bi = &bodies[i];
        let mut total = NVec2::zeros();

        // Skip by slot, not by value: two bodies may share identical state
        for (j, bj) in bodies.iter().enumerate() {
            if j == i {
                continue;
            }
            total += self.pair_force(bi.x, bi.m, bj.x, bj.m);
        }

        total
    }
}
