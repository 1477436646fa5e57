//! High-level runtime engine settings
//!
//! Selects how the driver calls the integrator: once per rendered frame, or
//! a fixed number of steps before a single draw

use crate::configuration::config::RunConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Live, // one step per frame
    Batch, // `steps` steps, then one draw
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub mode: RunMode,
    pub steps: usize, // step count for batch and headless runs
}

impl Engine {
    pub fn from_config(cfg: &RunConfig) -> Self {
        let mode = if cfg.animate { RunMode::Live } else { RunMode::Batch };
        Self {
            mode,
            steps: cfg.steps,
        }
    }
}
