//! Interactive display through a spawned Rerun viewer.
//!
//! Enable with the `viewer` feature flag.

use rerun::RecordingStreamBuilder;

use crate::error::{Result, TrajectoryError};
use crate::trajectory_sampling::Trajectory;

const LINE_COLOR: [u8; 4] = [31, 119, 180, 255];
const START_COLOR: [u8; 4] = [0, 160, 0, 255];
const END_COLOR: [u8; 4] = [200, 0, 0, 255];

fn viewer_err<E: std::fmt::Display>(e: E) -> TrajectoryError {
    TrajectoryError::Render(e.to_string())
}

fn to_f32(p: nalgebra::Vector3<f64>) -> [f32; 3] {
    [p.x as f32, p.y as f32, p.z as f32]
}

/// Spawn the viewer and send the trajectory with its start and end markers
pub fn show(trajectory: &Trajectory, app_id: &str) -> Result<()> {
    let (Some(start), Some(end)) = (trajectory.start(), trajectory.end()) else {
        return Err(TrajectoryError::Render("trajectory has no points".to_string()));
    };

    let rec = RecordingStreamBuilder::new(app_id).spawn().map_err(viewer_err)?;

    // y is the vertical axis of the physics model
    rec.log_static("world", &rerun::ViewCoordinates::RIGHT_HAND_Y_UP())
        .map_err(viewer_err)?;

    let strip: Vec<[f32; 3]> = trajectory.points().map(to_f32).collect();
    rec.log_static(
        "world/trajectory",
        &rerun::LineStrips3D::new([strip])
            .with_colors([LINE_COLOR])
            .with_labels(["Trayectoria"]),
    )
    .map_err(viewer_err)?;

    rec.log_static(
        "world/start",
        &rerun::Points3D::new([to_f32(start)])
            .with_colors([START_COLOR])
            .with_radii([0.5])
            .with_labels(["Inicio"]),
    )
    .map_err(viewer_err)?;

    rec.log_static(
        "world/end",
        &rerun::Points3D::new([to_f32(end)])
            .with_colors([END_COLOR])
            .with_radii([0.5])
            .with_labels(["Final"]),
    )
    .map_err(viewer_err)?;

    // Deliver everything to the viewer process before returning
    rec.flush_blocking();

    Ok(())
}
