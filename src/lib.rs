pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimulationError;

pub use simulation::states::{Body, BodyId, System, Trajectory, TrailPolicy, NVec2};
pub use simulation::forces::{Force, ForceSet, NewtonianAttraction};
pub use simulation::integrator::{advance, advance_steps};
pub use simulation::params::{Parameters, UpdateOrder};
pub use simulation::engine::{Engine, RunMode};
pub use simulation::scenario::{generate_system, Scenario};
pub use simulation::viewport::Viewport;

pub use configuration::config::{SimulationConfig, PhysicsConfig, SceneConfig, RunConfig, DisplayConfig, OutputConfig};

pub use visualization::vis2d::{run_live, run_still};

pub use benchmark::benchmark::bench_advance;
