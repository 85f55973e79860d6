//! Configuration types for non-interactive runs and rendering.
//!
//! A scenario file replaces the console prompts with a YAML document:
//!
//! ```yaml
//! t_final: 7.0              # seconds, must be >= 0
//! position: [1.0, 2.0, 3.0] # x0, y0, z0 in meters
//! velocity: [4.0, 5.0, 6.0] # vx0, vy0, vz0 in m/s
//! samples: 200              # optional, curve resolution
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DEFAULT_IMAGE_PATH, DEFAULT_IMAGE_SIZE, DEFAULT_SAMPLE_COUNT, MIN_SAMPLE_COUNT};
use crate::error::{Result, TrajectoryError};
use crate::input::{validate_final_time, RunInputs};
use crate::state::LaunchState;

/// Top-level scenario loaded from YAML
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub t_final: f64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub samples: Option<usize>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_yaml::from_reader(reader).map_err(|e| TrajectoryError::Scenario(e.to_string()))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| TrajectoryError::Scenario(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Apply the same validation as the console prompts
    pub fn into_inputs(self) -> Result<RunInputs> {
        let t_final = validate_final_time(self.t_final)?;
        if let Some(n) = self.samples.filter(|&n| n < MIN_SAMPLE_COUNT) {
            return Err(TrajectoryError::TooFewSamples(n));
        }

        let [x0, y0, z0] = self.position;
        let [vx0, vy0, vz0] = self.velocity;
        let state = LaunchState::from_components(x0, y0, z0, vx0, vy0, vz0);
        if !state.is_finite() {
            return Err(TrajectoryError::Scenario(
                "position and velocity must be finite".to_string(),
            ));
        }

        Ok(RunInputs { t_final, state })
    }
}

/// How the renderer should behave for one run
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub image_path: PathBuf,
    pub image_size: (u32, u32),
    /// Skip the display capability check and write the image directly
    pub force_image: bool,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            image_size: DEFAULT_IMAGE_SIZE,
            force_image: false,
            title: "Trayectoria del tiro parabólico".to_string(),
        }
    }
}

/// Resolve the sample count: explicit flag, then scenario, then default
pub fn resolve_samples(flag: Option<usize>, scenario: Option<usize>) -> usize {
    flag.or(scenario).unwrap_or(DEFAULT_SAMPLE_COUNT)
}
