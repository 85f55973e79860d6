//! 3D trajectory rendering.
//!
//! The renderer first checks whether an interactive surface exists. If it
//! does, the path is sent to the viewer; if it does not, or the viewer cannot
//! be launched, a PNG is written instead. Only a failure of that last step is
//! reported as an error.

use std::ffi::OsString;
use std::ops::Range;
use std::path::PathBuf;

use plotters::prelude::*;
use tracing::{debug, info, warn};

use crate::config::RenderOptions;
use crate::constants::MIN_AXIS_SPAN;
use crate::error::{Result, TrajectoryError};
use crate::trajectory_sampling::{Bounds, Trajectory};

/// Whether the current process can open an interactive plot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCapability {
    Interactive,
    Headless,
}

impl DisplayCapability {
    /// Inspect the build and the environment of this process
    pub fn detect() -> Self {
        let needs_display_server = cfg!(all(unix, not(target_os = "macos")));
        Self::detect_with(cfg!(feature = "viewer"), needs_display_server, |key| {
            std::env::var_os(key)
        })
    }

    /// `lookup` reads an environment variable; split out so the decision is testable
    pub fn detect_with<F>(viewer_built: bool, needs_display_server: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if !viewer_built {
            return DisplayCapability::Headless;
        }
        if !needs_display_server {
            return DisplayCapability::Interactive;
        }

        let has_server = ["DISPLAY", "WAYLAND_DISPLAY"]
            .iter()
            .any(|key| lookup(key).map_or(false, |v| !v.is_empty()));

        if has_server {
            DisplayCapability::Interactive
        } else {
            DisplayCapability::Headless
        }
    }
}

/// What the renderer ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Displayed,
    SavedImage(PathBuf),
}

impl RenderOutcome {
    /// Informational message for the user, if any
    pub fn notice(&self) -> Option<String> {
        match self {
            RenderOutcome::Displayed => None,
            RenderOutcome::SavedImage(path) => Some(format!(
                "Entorno sin interfaz gráfica → Imagen guardada como {}",
                path.display()
            )),
        }
    }
}

/// Draw the trajectory, preferring an interactive display over a saved image
pub fn render_trajectory(trajectory: &Trajectory, options: &RenderOptions) -> Result<RenderOutcome> {
    plot_ranges(trajectory)?;

    let capability = if options.force_image {
        DisplayCapability::Headless
    } else {
        DisplayCapability::detect()
    };
    debug!(?capability, "display capability");

    if capability == DisplayCapability::Interactive {
        match show_interactive(trajectory, &options.title) {
            Ok(()) => {
                info!("trajectory sent to interactive viewer");
                return Ok(RenderOutcome::Displayed);
            }
            Err(e) => warn!(error = %e, "interactive viewer unavailable, falling back to image"),
        }
    }

    save_png(trajectory, options)?;
    info!(path = %options.image_path.display(), "trajectory image written");
    Ok(RenderOutcome::SavedImage(options.image_path.clone()))
}

#[cfg(feature = "viewer")]
fn show_interactive(trajectory: &Trajectory, title: &str) -> Result<()> {
    crate::viewer::show(trajectory, title)
}

#[cfg(not(feature = "viewer"))]
fn show_interactive(_trajectory: &Trajectory, _title: &str) -> Result<()> {
    Err(TrajectoryError::Render("built without the `viewer` feature".to_string()))
}

/// Axis ranges of identical length centered on the trajectory
///
/// The common length is the largest extent plus a small margin, so one meter
/// covers the same distance on every axis.
pub fn equal_aspect_ranges(bounds: &Bounds) -> [Range<f64>; 3] {
    let extent = bounds.extent();
    let center = bounds.center();
    let side = extent.x.max(extent.y).max(extent.z).max(MIN_AXIS_SPAN) * 1.05;
    let half = side / 2.0;

    [
        (center.x - half)..(center.x + half),
        (center.y - half)..(center.y + half),
        (center.z - half)..(center.z + half),
    ]
}

/// Axis ranges for `trajectory`, or an error when it cannot be drawn
///
/// Huge inputs can overflow the closed form to ±inf or NaN; plotters cannot
/// build an axis over such values.
fn plot_ranges(trajectory: &Trajectory) -> Result<[Range<f64>; 3]> {
    if trajectory.points().any(|p| p.iter().any(|c| !c.is_finite())) {
        return Err(TrajectoryError::Render(
            "trajectory has non-finite coordinates".to_string(),
        ));
    }

    let bounds = trajectory
        .bounds()
        .ok_or_else(|| TrajectoryError::Render("trajectory has no points".to_string()))?;
    let ranges = equal_aspect_ranges(&bounds);

    let plottable = ranges
        .iter()
        .all(|r| r.start.is_finite() && r.end.is_finite() && r.start < r.end);
    if !plottable {
        return Err(TrajectoryError::Render(
            "trajectory extent is too large to plot".to_string(),
        ));
    }

    Ok(ranges)
}

fn render_err<E: std::fmt::Display>(e: E) -> TrajectoryError {
    TrajectoryError::Render(e.to_string())
}

/// Write the trajectory plot to `options.image_path`, replacing any existing file
pub fn save_png(trajectory: &Trajectory, options: &RenderOptions) -> Result<()> {
    let [x_range, y_range, z_range] = plot_ranges(trajectory)?;
    let (x_end, y_low, z_low) = (x_range.end, y_range.start, z_range.start);

    let root = BitMapBackend::new(&options.image_path, options.image_size).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 28))
        .margin(20)
        .build_cartesian_3d(x_range, y_range.clone(), z_range.clone())
        .map_err(render_err)?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.35;
        pb.yaw = 0.6;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .light_grid_style(&BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            trajectory.points().map(|p| (p.x, p.y, p.z)),
            BLUE.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("Trayectoria")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    if let (Some(start), Some(end)) = (trajectory.start(), trajectory.end()) {
        chart
            .draw_series(std::iter::once(Circle::new(
                (start.x, start.y, start.z),
                6,
                GREEN.filled(),
            )))
            .map_err(render_err)?
            .label("Inicio")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, GREEN.filled()));

        chart
            .draw_series(std::iter::once(Circle::new(
                (end.x, end.y, end.z),
                6,
                RED.filled(),
            )))
            .map_err(render_err)?
            .label("Final")
            .legend(|(x, y)| Circle::new((x + 10, y), 5, RED.filled()));
    }

    // Axis names at the far end of each axis
    let z_mid = (z_range.start + z_range.end) / 2.0;
    let labels = [
        ("X", (x_end, y_low, z_mid)),
        ("Y", (x_end, y_range.end, z_low)),
        ("Z", (x_end, y_low, z_range.end)),
    ];
    chart
        .draw_series(
            labels
                .iter()
                .map(|&(name, pos)| Text::new(name, pos, ("sans-serif", 22).into_font())),
        )
        .map_err(render_err)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
