//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario file is split into sections, each of which may be omitted and
//! falls back to the built-in defaults:
//!
//! - [`PhysicsConfig`] – gravitational constant, step size, distance guard, update order
//! - [`SceneConfig`]   – how the initial bodies are generated
//! - [`RunConfig`]     – live animation vs. batch run, trail cap
//! - [`DisplayConfig`] – camera follow and what gets drawn
//! - [`OutputConfig`]  – still image export
//!
//! # YAML format
//!
//! ```yaml
//! physics:
//!   G: 1.0e-6
//!   time_step: 0.5
//!   distance_threshold: 0.03
//!   update_order: "sequential"   # or "snapshot"
//!
//! scene:
//!   number_of_objects: 20
//!   base_velocity: [1.0e-7, 0.01]
//!   brightness_scale: 2.4
//!   sun: true
//!   sun_mass: 25.0
//!   seed: 42                     # omit for a random scene
//!
//! run:
//!   animate: true                # false -> run `steps` steps, then draw once
//!   steps: 10000
//!   trail_capacity: 500          # omit to keep every point
//!
//! display:
//!   follow_object: true
//!   zoom_level: 0.5
//!   show_objects: true
//!   show_trails: false
//!   show_labels: false
//!
//! output:
//!   save_output: true
//!   path: "plot.png"
//!   resolution: [1920, 1440]
//! ```

use serde::Deserialize;

use crate::error::SimulationError;
use crate::simulation::params::UpdateOrder;

/// Physical constants and step control
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PhysicsConfig {
    #[serde(rename = "G")]
    pub g: f64, // gravitational constant
    pub time_step: f64, // fixed step size
    pub distance_threshold: f64, // pairs at or below this separation exert no force
    pub update_order: UpdateOrder,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            g: 0.000001,
            time_step: 0.5,
            distance_threshold: 0.03,
            update_order: UpdateOrder::Sequential,
        }
    }
}

/// Initial scene generation
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SceneConfig {
    pub number_of_objects: usize, // random bodies, not counting the sun
    pub base_velocity: [f64; 2], // shared starting velocity of random bodies
    pub brightness_scale: f64, // random brightness multiplier, result clamped to 1
    pub sun: bool, // append a dominant body at the centre
    pub sun_mass: f64,
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            number_of_objects: 20,
            base_velocity: [0.0000001, 0.01],
            brightness_scale: 2.4,
            sun: true,
            sun_mass: 25.0,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct RunConfig {
    pub animate: bool, // true: one step per frame, false: `steps` steps then one draw
    pub steps: usize,
    pub trail_capacity: Option<usize>, // None keeps the full history
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            animate: true,
            steps: 10000,
            trail_capacity: None,
        }
    }
}

/// What the viewer draws and where the camera looks
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub follow_object: bool, // centre the view on the anchor body
    pub zoom_level: f64, // half-width of the followed view
    pub show_objects: bool,
    pub show_trails: bool, // can be expensive with long histories
    pub show_labels: bool,
    pub object_colour: [f32; 3],
    pub label_colour: [f32; 3],
    pub trail_colour: [f32; 3],
    pub face_colour: [f32; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            follow_object: true,
            zoom_level: 0.5,
            show_objects: true,
            show_trails: false,
            show_labels: false,
            object_colour: [1.0, 1.0, 1.0],
            label_colour: [1.0, 1.0, 1.0],
            trail_colour: [1.0, 0.0, 0.0],
            face_colour: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub save_output: bool, // write a still image after a batch run
    pub path: String,
    pub resolution: [u32; 2], // window size in pixels
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_output: true,
            path: "plot.png".to_string(),
            resolution: [1920, 1440],
        }
    }
}

/// Top-level scenario configuration loaded from YAML
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scene: SceneConfig,
    pub run: RunConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

impl SimulationConfig {
    /// Parse a YAML document and validate it
    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        let cfg: SimulationConfig = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimulationError> {
        let p = &self.physics;
        if !(p.time_step.is_finite() && p.time_step > 0.0) {
            return Err(SimulationError::config(format!("time_step must be finite and > 0, got {}", p.time_step)));
        }
        if !p.g.is_finite() {
            return Err(SimulationError::config(format!("G must be finite, got {}", p.g)));
        }
        if !(p.distance_threshold.is_finite() && p.distance_threshold >= 0.0) {
            return Err(SimulationError::config(format!(
                "distance_threshold must be finite and >= 0, got {}",
                p.distance_threshold
            )));
        }

        let s = &self.scene;
        if s.number_of_objects == 0 && !s.sun {
            return Err(SimulationError::config("scene has no bodies: number_of_objects is 0 and sun is off"));
        }
        if s.sun && !(s.sun_mass.is_finite() && s.sun_mass > 0.0) {
            return Err(SimulationError::config(format!("sun_mass must be finite and > 0, got {}", s.sun_mass)));
        }
        if !s.base_velocity.iter().all(|v| v.is_finite()) {
            return Err(SimulationError::config(format!("base_velocity must be finite, got {:?}", s.base_velocity)));
        }
        if !(s.brightness_scale.is_finite() && s.brightness_scale >= 0.0) {
            return Err(SimulationError::config(format!(
                "brightness_scale must be finite and >= 0, got {}",
                s.brightness_scale
            )));
        }

        if self.run.trail_capacity == Some(0) {
            return Err(SimulationError::config("trail_capacity must be at least 1"));
        }

        let d = &self.display;
        if !(d.zoom_level.is_finite() && d.zoom_level > 0.0) {
            return Err(SimulationError::config(format!("zoom_level must be finite and > 0, got {}", d.zoom_level)));
        }

        if self.output.resolution.contains(&0) {
            return Err(SimulationError::config("output resolution must be non-zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = SimulationConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg.physics.g, 0.000001);
        assert_eq!(cfg.physics.time_step, 0.5);
        assert_eq!(cfg.scene.number_of_objects, 20);
        assert!(cfg.scene.sun);
        assert_eq!(cfg.run.steps, 10000);
        assert_eq!(cfg.output.path, "plot.png");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let yaml = "physics:\n  G: 2.0\n  update_order: snapshot\n";
        let cfg = SimulationConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.physics.g, 2.0);
        assert_eq!(cfg.physics.update_order, UpdateOrder::Snapshot);
        assert_eq!(cfg.physics.distance_threshold, 0.03);
    }

    #[test]
    fn unknown_update_order_is_rejected() {
        let yaml = "physics:\n  update_order: leapfrog\n";
        assert!(SimulationConfig::from_yaml_str(yaml).is_err());
    }
}
