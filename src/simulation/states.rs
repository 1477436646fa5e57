//! Core state types for the simulation.
//!
//! - `Body`       one point mass and its trajectory
//! - `Trajectory` past positions, optionally capped
//! - `System`     the ordered body registry, simulation time and step count
//!
//! Body order is fixed once a `System` is built. Each body keeps the
//! `BodyId` of the slot it was created in, and the system may name one body
//! as its anchor (camera-follow target).

use std::collections::VecDeque;

use nalgebra::Vector2;

use crate::error::SimulationError;

pub type NVec2 = Vector2<f64>;

/// Stable handle to a body, equal to its slot in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// How much trajectory history each body keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailPolicy {
    #[default]
    Unbounded,
    /// Keep only the newest `n` points
    Capped(usize),
}

/// Chronological list of past positions
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    points: VecDeque<NVec2>,
    policy: TrailPolicy,
    recorded: u64, // points ever pushed, including dropped ones
}

impl Trajectory {
    pub fn new(policy: TrailPolicy) -> Self {
        let points = match policy {
            TrailPolicy::Unbounded => VecDeque::new(),
            TrailPolicy::Capped(n) => VecDeque::with_capacity(n.min(4096)),
        };
        Self { points, policy, recorded: 0 }
    }

    pub fn push(&mut self, p: NVec2) {
        if let TrailPolicy::Capped(n) = self.policy {
            if n == 0 {
                self.recorded += 1;
                return;
            }
            while self.points.len() >= n {
                self.points.pop_front();
            }
        }
        self.points.push_back(p);
        self.recorded += 1;
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total number of points recorded since creation
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn last(&self) -> Option<&NVec2> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn policy(&self) -> TrailPolicy {
        self.policy
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub m: f64, // mass
    pub brightness: f64, // render alpha, no physical effect
    id: BodyId,
    trajectory: Trajectory,
}

impl Body {
    /// New body with an empty unbounded trajectory. Rejects invalid mass.
    pub fn new(x: NVec2, v: NVec2, m: f64, brightness: f64) -> Result<Self, SimulationError> {
        if !(m.is_finite() && m > 0.0) {
            return Err(SimulationError::InvalidMass { body: 0, mass: m });
        }
        Ok(Self {
            x,
            v,
            m,
            brightness: brightness.clamp(0.0, 1.0),
            id: BodyId(0),
            trajectory: Trajectory::new(TrailPolicy::Unbounded),
        })
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Append the current position to the trajectory
    pub(crate) fn record(&mut self) {
        self.trajectory.push(self.x);
    }
}

#[derive(Debug, Clone)]
pub struct System {
    bodies: Vec<Body>, // fixed order for the whole run
    anchor: Option<BodyId>, // camera-follow target
    pub t: f64, // time
    pub step: u64, // completed steps
}

impl System {
    /// Build a registry. Ids are assigned from slot order and every
    /// trajectory is reset to `trail`.
    pub fn new(bodies: Vec<Body>, anchor: Option<BodyId>, trail: TrailPolicy) -> Result<Self, SimulationError> {
        if bodies.is_empty() {
            return Err(SimulationError::EmptyRegistry);
        }
        if let TrailPolicy::Capped(0) = trail {
            return Err(SimulationError::config("trail capacity must be at least 1"));
        }
        if let Some(BodyId(a)) = anchor {
            if a >= bodies.len() {
                return Err(SimulationError::config(format!(
                    "anchor {a} out of range for {} bodies",
                    bodies.len()
                )));
            }
        }

        let mut bodies = bodies;
        for (i, b) in bodies.iter_mut().enumerate() {
            if !(b.m.is_finite() && b.m > 0.0) {
                return Err(SimulationError::InvalidMass { body: i, mass: b.m });
            }
            b.id = BodyId(i);
            b.trajectory = Trajectory::new(trail);
        }

        Ok(Self { bodies, anchor, t: 0.0, step: 0 })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to body state. The slice cannot be resized or
    /// reordered through this borrow.
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    pub fn anchor(&self) -> Option<BodyId> {
        self.anchor
    }

    pub fn anchor_body(&self) -> Option<&Body> {
        self.anchor.and_then(|id| self.body(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_trajectory_keeps_newest() {
        let mut tr = Trajectory::new(TrailPolicy::Capped(3));
        for i in 0..5 {
            tr.push(NVec2::new(i as f64, 0.0));
        }
        let xs: Vec<f64> = tr.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(tr.recorded(), 5);
    }

    #[test]
    fn unbounded_trajectory_keeps_everything() {
        let mut tr = Trajectory::new(TrailPolicy::Unbounded);
        for i in 0..100 {
            tr.push(NVec2::new(0.0, i as f64));
        }
        assert_eq!(tr.len(), 100);
        assert_eq!(tr.last(), Some(&NVec2::new(0.0, 99.0)));
    }
}
