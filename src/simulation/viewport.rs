//! Visible region of the simulation plane
//!
//! With follow enabled the view is a square of half-width `zoom` centred on
//! the system's anchor body; otherwise it is the unit square.

use super::states::{NVec2, System};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// The nominal [0,1] x [0,1] plane
    pub fn unit() -> Self {
        Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 }
    }

    pub fn centred_on(c: NVec2, zoom: f64) -> Self {
        Self {
            x_min: c.x - zoom,
            x_max: c.x + zoom,
            y_min: c.y - zoom,
            y_max: c.y + zoom,
        }
    }

    /// Falls back to the unit square when the system has no anchor
    pub fn for_system(sys: &System, follow: bool, zoom: f64) -> Self {
        match sys.anchor_body() {
            Some(b) if follow => Self::centred_on(b.x, zoom),
            _ => Self::unit(),
        }
    }

    pub fn centre(&self) -> NVec2 {
        NVec2::new(0.5 * (self.x_min + self.x_max), 0.5 * (self.y_min + self.y_max))
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
