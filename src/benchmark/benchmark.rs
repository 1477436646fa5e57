//! Timing of `advance` for growing body counts
//!
//! Bodies sit on a deterministic pseudo-random layout inside the unit
//! plane, so runs are comparable without a seed. Both update orders are
//! timed from the same starting system.

use std::time::Instant;

use tracing::info;

use crate::error::SimulationError;
use crate::simulation::forces::{ForceSet, NewtonianAttraction};
use crate::simulation::integrator::advance;
use crate::simulation::params::{Parameters, UpdateOrder};
use crate::simulation::states::{Body, NVec2, System, TrailPolicy};

/// Helper to build a manual System of size `n`
fn make_system(n: usize) -> Result<System, SimulationError> {
    let mut bodies = Vec::with_capacity(n);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = NVec2::new(
            0.5 + 0.45 * (i_f * 0.37).sin(),
            0.5 + 0.45 * (i_f * 0.13).cos(),
        );
        bodies.push(Body::new(x, NVec2::new(0.0, 0.01), 0.5, 1.0)?);
    }

    // Trails capped so memory does not skew the larger runs
    System::new(bodies, None, TrailPolicy::Capped(64))
}

fn time_steps(template: &System, forces: &ForceSet, params: &Parameters, steps: usize) -> Result<f64, SimulationError> {
    let mut sys = template.clone();

    // Warm up
    advance(&mut sys, forces, params)?;

    let t0 = Instant::now();
    for _ in 0..steps {
        advance(&mut sys, forces, params)?;
    }
    Ok(t0.elapsed().as_secs_f64() * 1000.0 / steps as f64)
}

/// Print per-step cost of the sequential and snapshot update orders
pub fn bench_advance() -> Result<(), SimulationError> {
    let ns = [20, 50, 100, 200, 400, 800, 1600];

    info!(sizes = ?ns, "benchmarking advance");
    println!("N,sequential_ms,snapshot_ms");

    for n in ns {
        // Small n: average over many steps to smooth noise
        let steps = if n <= 200 { 200 } else { 10 };

        let template = make_system(n)?;
        let sequential = Parameters::new(0.5, 0.000001, 0.03, UpdateOrder::Sequential)?;
        let snapshot = Parameters { update_order: UpdateOrder::Snapshot, ..sequential.clone() };

        let forces = ForceSet::new().with(NewtonianAttraction {
            G: sequential.G,
            distance_threshold: sequential.distance_threshold,
        });

        let ms_seq = time_steps(&template, &forces, &sequential, steps)?;
        let ms_snap = time_steps(&template, &forces, &snapshot, steps)?;

        println!("{},{:.6},{:.6}", n, ms_seq, ms_snap);
    }

    Ok(())
}
