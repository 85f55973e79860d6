use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Initial conditions of a projectile at t = 0
///
/// Position in meters, velocity in meters per second. The y axis is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl LaunchState {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self { position, velocity }
    }

    /// Build from the six scalars in prompt order (x0, y0, z0, vx0, vy0, vz0)
    pub fn from_components(x0: f64, y0: f64, z0: f64, vx0: f64, vy0: f64, vz0: f64) -> Self {
        Self {
            position: Vector3::new(x0, y0, z0),
            velocity: Vector3::new(vx0, vy0, vz0),
        }
    }

    pub fn components(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }
}

impl Default for LaunchState {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
        }
    }
}
