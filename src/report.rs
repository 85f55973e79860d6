//! Console reporting for evaluated points and sampled trajectories

use std::io::{self, Write};

use nalgebra::Vector3;
use serde::Serialize;

use crate::state::LaunchState;
use crate::trajectory_sampling::{Trajectory, TrajectoryPoint};

/// Export format for the sampled trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Serialize)]
struct TrajectoryExport<'a> {
    t_final: f64,
    initial_state: &'a LaunchState,
    samples: usize,
    points: Vec<TrajectoryPoint>,
}

/// Print the position at the requested instant, 4 decimals with meter suffix
pub fn write_point<W: Write>(out: &mut W, t: f64, position: &Vector3<f64>) -> io::Result<()> {
    writeln!(out, "Posición de la partícula en t = {} s:", t)?;
    writeln!(out, "x(t) = {:.4} m", position.x)?;
    writeln!(out, "y(t) = {:.4} m", position.y)?;
    writeln!(out, "z(t) = {:.4} m", position.z)?;
    Ok(())
}

/// Print the sampled trajectory in the chosen format
pub fn write_trajectory<W: Write>(
    out: &mut W,
    trajectory: &Trajectory,
    state: &LaunchState,
    format: OutputFormat,
) -> io::Result<()> {
    let points = trajectory.to_points(state);

    match format {
        OutputFormat::Json => {
            let export = TrajectoryExport {
                t_final: trajectory.times.last().copied().unwrap_or(0.0),
                initial_state: state,
                samples: points.len(),
                points,
            };
            let json = serde_json::to_string_pretty(&export)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{}", json)?;
        }

        OutputFormat::Csv => {
            writeln!(out, "time,x,y,z,speed,flags")?;
            for p in &points {
                let flags: Vec<&str> = p.flags.iter().map(|f| f.as_str()).collect();
                writeln!(
                    out,
                    "{:.4},{:.4},{:.4},{:.4},{:.4},{}",
                    p.time_s, p.x_m, p.y_m, p.z_m, p.speed_mps,
                    flags.join("|")
                )?;
            }
        }

        OutputFormat::Table => {
            writeln!(out, "┌──────────┬────────────┬────────────┬────────────┬────────────┬────────┐")?;
            writeln!(out, "│ Time (s) │   X (m)    │   Y (m)    │   Z (m)    │ Vel (m/s)  │ Event  │")?;
            writeln!(out, "├──────────┼────────────┼────────────┼────────────┼────────────┼────────┤")?;

            // Ten evenly spaced rows plus every flagged sample
            let step = (points.len() / 10).max(1);
            for (i, p) in points.iter().enumerate() {
                if i % step == 0 || !p.flags.is_empty() {
                    let event = p.flags.first().map(|f| f.as_str()).unwrap_or("");
                    writeln!(
                        out,
                        "│ {:>8.3} │ {:>10.3} │ {:>10.3} │ {:>10.3} │ {:>10.3} │ {:<6} │",
                        p.time_s, p.x_m, p.y_m, p.z_m, p.speed_mps, event
                    )?;
                }
            }
            writeln!(out, "└──────────┴────────────┴────────────┴────────────┴────────────┴────────┘")?;
        }
    }

    Ok(())
}
