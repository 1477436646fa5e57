//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - fixed step size `dt`,
//! - gravitational constant `G` and the minimum-distance guard,
//! - the order in which bodies are updated within a step

use serde::Deserialize;

use crate::error::SimulationError;

/// Order in which bodies see each other's updates within one step
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateOrder {
    /// Body i reads the already-updated positions of bodies 0..i
    #[default]
    #[serde(rename = "sequential")]
    Sequential,

    /// All forces come from the positions at the start of the step
    #[serde(rename = "snapshot")]
    Snapshot,
}

#[derive(Debug, Clone)]
#[allow(non_snake_case)]
pub struct Parameters {
    pub dt: f64, // step size
    pub G: f64, // gravitational constant
    pub distance_threshold: f64, // no force at or below this separation
    pub update_order: UpdateOrder,
}

impl Parameters {
    #[allow(non_snake_case)]
    pub fn new(dt: f64, G: f64, distance_threshold: f64, update_order: UpdateOrder) -> Result<Self, SimulationError> {
        let p = Self { dt, G, distance_threshold, update_order };
        p.validate()?;
        Ok(p)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SimulationError::config(format!("time step must be finite and > 0, got {}", self.dt)));
        }
        if !self.G.is_finite() {
            return Err(SimulationError::config(format!("G must be finite, got {}", self.G)));
        }
        if !(self.distance_threshold.is_finite() && self.distance_threshold >= 0.0) {
            return Err(SimulationError::config(format!(
                "distance threshold must be finite and >= 0, got {}",
                self.distance_threshold
            )));
        }
        Ok(())
    }
}
