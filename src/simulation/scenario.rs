//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `SimulationConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with generated bodies at t = 0)
//! - active force set (`ForceSet`)
//! - display and output settings for the viewer
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! integration and visualization systems

use std::time::Instant;

use bevy::prelude::Resource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::configuration::config::{DisplayConfig, OutputConfig, SceneConfig, SimulationConfig};
use crate::error::SimulationError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NewtonianAttraction};
use crate::simulation::integrator::{advance, advance_steps};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyId, NVec2, System, TrailPolicy};

/// Batch runs log progress every this many steps
const BATCH_LOG_INTERVAL: usize = 1000;

/// Centre of the unit plane, where the dominant body starts
const SUN_POSITION: [f64; 2] = [0.5, 0.5];

/// Generate the initial registry for a scene
///
/// Random bodies get uniform positions in [0,1)^2, uniform mass in (0,1) and
/// the shared base velocity. If `scene.sun` is set, a dominant body is
/// appended at the centre at rest and becomes the anchor; otherwise the last
/// random body is the anchor.
pub fn generate_system(scene: &SceneConfig, trail: TrailPolicy, rng: &mut impl Rng) -> Result<System, SimulationError> {
    let n = scene.number_of_objects;
    let xs: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let ys: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();

    let base_v = NVec2::new(scene.base_velocity[0], scene.base_velocity[1]);

    let mut bodies = Vec::with_capacity(n + usize::from(scene.sun));
    for (x, y) in xs.into_iter().zip(ys) {
        let brightness = (rng.gen::<f64>() * scene.brightness_scale).min(1.0);
        // zero mass would divide by zero in the update rule
        let m = rng.gen_range(f64::MIN_POSITIVE..1.0);
        bodies.push(Body::new(NVec2::new(x, y), base_v, m, brightness)?);
    }

    if scene.sun {
        bodies.push(Body::new(
            NVec2::new(SUN_POSITION[0], SUN_POSITION[1]),
            NVec2::zeros(),
            scene.sun_mass,
            1.0,
        )?);
    }

    let anchor = bodies.len().checked_sub(1).map(BodyId);
    System::new(bodies, anchor, trail)
}

/// Bevy resource representing a fully-initialized simulation scenario
///
/// This is the main "runtime bundle" constructed from a [`SimulationConfig`]:
/// it contains the engine settings, parameters, current system state, the
/// active force laws, and what the viewer should draw
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: ForceSet,
    pub display: DisplayConfig,
    pub output: OutputConfig,
    pub seed: u64, // seed the scene was generated from
}

impl Scenario {
    pub fn build_scenario(cfg: SimulationConfig) -> Result<Self, SimulationError> {
        cfg.validate()?;

        // Draw a seed when none is configured so the run can be replayed
        let seed = cfg.scene.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let trail = match cfg.run.trail_capacity {
            Some(n) => TrailPolicy::Capped(n),
            None => TrailPolicy::Unbounded,
        };
        let system = generate_system(&cfg.scene, trail, &mut rng)?;

        // Parameters (runtime) from PhysicsConfig
        let p_cfg = &cfg.physics;
        let parameters = Parameters::new(p_cfg.time_step, p_cfg.g, p_cfg.distance_threshold, p_cfg.update_order)?;

        // Forces: pairwise attraction is the only term
        let forces = ForceSet::new().with(NewtonianAttraction {
            G: parameters.G,
            distance_threshold: parameters.distance_threshold,
        });

        info!(
            seed,
            bodies = system.len(),
            sun = cfg.scene.sun,
            dt = parameters.dt,
            order = ?parameters.update_order,
            "scenario built"
        );

        Ok(Self {
            engine: Engine::from_config(&cfg.run),
            parameters,
            system,
            forces,
            display: cfg.display,
            output: cfg.output,
            seed,
        })
    }

    /// One integration step, as the live viewer calls it every frame
    pub fn step(&mut self) -> Result<(), SimulationError> {
        advance(&mut self.system, &self.forces, &self.parameters)
    }

    /// Run `engine.steps` steps back to back
    pub fn run_batch(&mut self) -> Result<(), SimulationError> {
        let steps = self.engine.steps;
        info!(steps, bodies = self.system.len(), "batch run started");
        let started = Instant::now();

        let mut done = 0;
        while done < steps {
            let chunk = BATCH_LOG_INTERVAL.min(steps - done);
            advance_steps(&mut self.system, &self.forces, &self.parameters, chunk)?;
            done += chunk;
            debug!(done, t = self.system.t, "batch progress");
        }

        info!(
            steps,
            t = self.system.t,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch run finished"
        );
        Ok(())
    }
}
