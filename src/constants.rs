//! Physical constants and defaults used by the trajectory engine

/// Gravitational acceleration magnitude in m/s², applied along -y
///
/// Value: 9.8 m/s² (rounded Earth surface gravity, not the standard 9.80665)
pub const G_ACCEL_MPS2: f64 = 9.8;

/// Number of time samples used to draw a trajectory curve
pub const DEFAULT_SAMPLE_COUNT: usize = 200;

/// Smallest sample count that still produces a curve (both endpoints)
pub const MIN_SAMPLE_COUNT: usize = 2;

/// File written when no interactive display surface is available
pub const DEFAULT_IMAGE_PATH: &str = "trayectoria.png";

/// Pixel size of the fallback image (width, height)
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (1024, 768);

/// Axis span used for plot bounds when every sample shares one coordinate
pub const MIN_AXIS_SPAN: f64 = 1.0;
