//! Error types for the simulation core
//!
//! Every fallible core operation returns [`SimulationError`]. The binary wraps
//! these in `anyhow` at the top level.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("a system needs at least one body")]
    EmptyRegistry,

    /// Mass must be finite and strictly positive, the update rule divides by it
    #[error("body {body} has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass { body: usize, mass: f64 },

    /// Position or velocity went non-finite after an update
    #[error("body {body} became non-finite at step {step}: x = {position:?}, v = {velocity:?}")]
    NumericalInstability {
        body: usize,
        step: u64,
        position: [f64; 2],
        velocity: [f64; 2],
    },
}

impl SimulationError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
