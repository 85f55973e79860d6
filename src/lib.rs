//! # Projectile Engine
//!
//! Closed-form 3D projectile motion under constant gravity: evaluate the
//! position at any instant, sample the path over `[0, t_final]` and plot it.

// Re-export the main types and functions
pub use constants::{DEFAULT_IMAGE_PATH, DEFAULT_SAMPLE_COUNT, G_ACCEL_MPS2};
pub use error::{Result, TrajectoryError};
pub use state::LaunchState;
pub use kinematics::{apex_time, position_at, positions_at, velocity_at};
pub use trajectory_sampling::{linspace, sample_trajectory, Bounds, Trajectory, TrajectoryFlag, TrajectoryPoint};
pub use input::{Prompter, RunInputs};
pub use config::{RenderOptions, ScenarioConfig};
pub use render::{render_trajectory, DisplayCapability, RenderOutcome};
pub use report::OutputFormat;

// Module declarations
pub mod constants;
pub mod error;
pub mod state;
pub mod kinematics;
pub mod trajectory_sampling;
pub mod input;
pub mod config;
pub mod render;
pub mod report;
#[cfg(feature = "viewer")]
mod viewer;
