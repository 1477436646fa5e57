//! Fixed-step time integrator for the body registry
//!
//! Semi-implicit Euler: for every body, v += (F / m) dt, then x += v dt, then
//! the new position is appended to the trajectory. Forces come from a
//! `ForceSet`; step size and update order from `Parameters`.

use super::forces::ForceSet;
use super::params::{Parameters, UpdateOrder};
use super::states::{Body, NVec2, System};
use crate::error::SimulationError;

/// Advance the system by one step of `params.dt`
///
/// With `UpdateOrder::Sequential` each body is updated in registry order and
/// later bodies see the new positions of earlier ones. With
/// `UpdateOrder::Snapshot` all forces are computed before any body moves.
///
/// On a non-finite result the step stops at the offending body and returns
/// `NumericalInstability`; bodies before it have already been updated.
pub fn advance(sys: &mut System, forces: &ForceSet, params: &Parameters) -> Result<(), SimulationError> {
    params.validate()?;

    // Mass is checked up front so a bad body never leaves a half-applied step
    for (i, b) in sys.bodies().iter().enumerate() {
        if !(b.m.is_finite() && b.m > 0.0) {
            return Err(SimulationError::InvalidMass { body: i, mass: b.m });
        }
    }

    let dt = params.dt;
    let step = sys.step + 1;
    let bodies = sys.bodies_mut();

    match params.update_order {
        UpdateOrder::Sequential => {
            for i in 0..bodies.len() {
                let f = forces.total_force(i, bodies);
                kick_drift(&mut bodies[i], f, dt);
                check_finite(i, step, &bodies[i])?;
            }
        }
        UpdateOrder::Snapshot => {
            let mut f = vec![NVec2::zeros(); bodies.len()];
            forces.accumulate_forces(bodies, &mut f);
            for (i, (b, f)) in bodies.iter_mut().zip(f.iter()).enumerate() {
                kick_drift(b, *f, dt);
                check_finite(i, step, b)?;
            }
        }
    }

    sys.step = step;
    sys.t += dt;
    Ok(())
}

/// Advance the system `n_steps` times, stopping at the first error
pub fn advance_steps(
    sys: &mut System,
    forces: &ForceSet,
    params: &Parameters,
    n_steps: usize,
) -> Result<(), SimulationError> {
    for _ in 0..n_steps {
        advance(sys, forces, params)?;
    }
    Ok(())
}

// v += (F / m) dt; x += v dt; record x
fn kick_drift(b: &mut Body, f: NVec2, dt: f64) {
    b.v += (f / b.m) * dt;
    b.x += b.v * dt;
    b.record();
}

fn check_finite(i: usize, step: u64, b: &Body) -> Result<(), SimulationError> {
    let finite = b.x.iter().chain(b.v.iter()).all(|c| c.is_finite());
    if finite {
        return Ok(());
    }
    Err(SimulationError::NumericalInstability {
        body: i,
        step,
        position: [b.x.x, b.x.y],
        velocity: [b.v.x, b.v.y],
    })
}
