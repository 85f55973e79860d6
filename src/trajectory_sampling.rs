use nalgebra::Vector3;
use serde::Serialize;
use tracing::debug;

use crate::constants::MIN_SAMPLE_COUNT;
use crate::error::{Result, TrajectoryError};
use crate::kinematics::{apex_time, position_at, velocity_at};
use crate::state::LaunchState;

/// Notable events attached to a trajectory sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrajectoryFlag {
    Start,
    Apex,
    End,
}

impl TrajectoryFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryFlag::Start => "start",
            TrajectoryFlag::Apex => "apex",
            TrajectoryFlag::End => "end",
        }
    }
}

/// Sampled path of a projectile: parallel, index-aligned sequences
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub times: Vec<f64>,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub zs: Vec<f64>,
}

/// Single trajectory sample with derived quantities, used for exports
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryPoint {
    pub time_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
    pub speed_mps: f64,
    pub flags: Vec<TrajectoryFlag>,
}

/// Axis-aligned extents of a trajectory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Bounds {
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }
}

/// `n` evenly spaced values from `start` to `end`, both endpoints included
///
/// The last value is `end` exactly; an `n` of 1 yields `[start]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = n - 1;
            let step = (end - start) / last as f64;
            (0..n)
                .map(|i| if i == last { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Sample the closed-form trajectory at `n` evenly spaced times in `[0, t_final]`
///
/// Every sample is evaluated independently from the launch state, so sample
/// `i` is exactly `position_at(state, times[i])`.
pub fn sample_trajectory(state: &LaunchState, t_final: f64, n: usize) -> Result<Trajectory> {
    if !t_final.is_finite() {
        return Err(TrajectoryError::NonFiniteTime(t_final));
    }
    if t_final < 0.0 {
        return Err(TrajectoryError::NegativeTime(t_final));
    }
    if n < MIN_SAMPLE_COUNT {
        return Err(TrajectoryError::TooFewSamples(n));
    }

    let times = linspace(0.0, t_final, n);
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    let mut zs = Vec::with_capacity(n);

    for &t in &times {
        let p = position_at(state, t);
        xs.push(p.x);
        ys.push(p.y);
        zs.push(p.z);
    }

    debug!(samples = n, t_final, "sampled trajectory");

    Ok(Trajectory { times, xs, ys, zs })
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn point(&self, i: usize) -> Option<Vector3<f64>> {
        if i < self.len() {
            Some(Vector3::new(self.xs[i], self.ys[i], self.zs[i]))
        } else {
            None
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Vector3<f64>> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .zip(&self.zs)
            .map(|((&x, &y), &z)| Vector3::new(x, y, z))
    }

    pub fn start(&self) -> Option<Vector3<f64>> {
        self.point(0)
    }

    pub fn end(&self) -> Option<Vector3<f64>> {
        self.len().checked_sub(1).and_then(|i| self.point(i))
    }

    /// Per-axis minimum and maximum over all samples
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.points();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Some(Bounds { min, max })
    }

    /// Expand into per-sample records with speed and event flags
    pub fn to_points(&self, state: &LaunchState) -> Vec<TrajectoryPoint> {
        let mut points: Vec<TrajectoryPoint> = self
            .times
            .iter()
            .zip(self.points())
            .map(|(&t, p)| TrajectoryPoint {
                time_s: t,
                x_m: p.x,
                y_m: p.y,
                z_m: p.z,
                speed_mps: velocity_at(state, t).norm(),
                flags: Vec::new(),
            })
            .collect();

        add_trajectory_flags(&mut points, &self.times, state);
        points
    }
}

fn add_trajectory_flags(points: &mut [TrajectoryPoint], times: &[f64], state: &LaunchState) {
    let Some(last) = points.len().checked_sub(1) else {
        return;
    };

    points[0].flags.push(TrajectoryFlag::Start);

    // Only flag an apex that falls inside the sampled window
    if let Some(t_apex) = apex_time(state) {
        if t_apex <= times[last] {
            if let Some(idx) = find_closest_sample_index(times, t_apex) {
                points[idx].flags.push(TrajectoryFlag::Apex);
            }
        }
    }

    points[last].flags.push(TrajectoryFlag::End);
}

/// Find the index of the sample time closest to `target`
fn find_closest_sample_index(times: &[f64], target: f64) -> Option<usize> {
    if times.is_empty() {
        return None;
    }

    // First index whose time is >= target
    let left = times.partition_point(|&t| t < target);
    let mut best_idx = left.min(times.len() - 1);

    if left > 0 {
        let left_dist = (times[left - 1] - target).abs();
        let right_dist = (times[best_idx] - target).abs();

        if left_dist < right_dist {
            best_idx = left - 1;
        }
    }

    Some(best_idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn reference_state() -> LaunchState {
        LaunchState::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
    }

    #[test]
    fn test_linspace_endpoints_and_spacing() {
        let ts = linspace(0.0, 7.0, 200);
        assert_eq!(ts.len(), 200);
        assert_eq!(ts[0], 0.0);
        assert_eq!(ts[199], 7.0);

        let step = 7.0 / 199.0;
        for w in ts.windows(2) {
            assert!((w[1] - w[0] - step).abs() < TOL);
        }

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_trajectory_basic() {
        let state = reference_state();
        let traj = sample_trajectory(&state, 7.0, 200).unwrap();

        assert_eq!(traj.len(), 200);
        assert_eq!(traj.xs.len(), 200);
        assert_eq!(traj.ys.len(), 200);
        assert_eq!(traj.zs.len(), 200);
        assert_eq!(traj.times[0], 0.0);
        assert_eq!(traj.times[199], 7.0);

        let start = traj.start().unwrap();
        assert_eq!(start, state.position);

        let end = traj.end().unwrap();
        assert!((end.x - 29.0).abs() < TOL);
        assert!((end.y - (-203.1)).abs() < TOL);
        assert!((end.z - 45.0).abs() < TOL);
    }

    #[test]
    fn test_samples_match_pointwise_evaluation() {
        let state = LaunchState::from_components(-2.0, 10.0, 0.5, 3.0, 12.0, -4.0);
        let traj = sample_trajectory(&state, 3.3, 57).unwrap();

        for (i, &t) in traj.times.iter().enumerate() {
            let expected = position_at(&state, t);
            assert_eq!(traj.point(i).unwrap(), expected);
        }
    }

    #[test]
    fn test_zero_final_time_is_degenerate_not_error() {
        let state = reference_state();
        let traj = sample_trajectory(&state, 0.0, 200).unwrap();

        assert_eq!(traj.len(), 200);
        assert!(traj.times.iter().all(|&t| t == 0.0));
        assert!(traj.points().all(|p| p == state.position));
    }

    #[test]
    fn test_sample_trajectory_rejects_bad_arguments() {
        let state = reference_state();

        assert!(matches!(
            sample_trajectory(&state, -1.0, 200),
            Err(TrajectoryError::NegativeTime(_))
        ));
        assert!(matches!(
            sample_trajectory(&state, f64::NAN, 200),
            Err(TrajectoryError::NonFiniteTime(_))
        ));
        assert!(matches!(
            sample_trajectory(&state, f64::INFINITY, 200),
            Err(TrajectoryError::NonFiniteTime(_))
        ));
        assert!(matches!(
            sample_trajectory(&state, 1.0, 1),
            Err(TrajectoryError::TooFewSamples(1))
        ));
        assert!(sample_trajectory(&state, 1.0, 2).is_ok());
    }

    #[test]
    fn test_bounds() {
        let state = LaunchState::from_components(0.0, 0.0, 0.0, 1.0, 9.8, -2.0);
        let traj = sample_trajectory(&state, 2.0, 201).unwrap();
        let bounds = traj.bounds().unwrap();

        assert!((bounds.min.x - 0.0).abs() < TOL);
        assert!((bounds.max.x - 2.0).abs() < TOL);
        // apex at t = 1 s, height 4.9 m; back to 0 at t = 2 s
        assert!((bounds.max.y - 4.9).abs() < TOL);
        assert!(bounds.min.y.abs() < TOL);
        assert!((bounds.min.z - (-4.0)).abs() < TOL);
        assert!((bounds.extent().x - 2.0).abs() < TOL);
        assert!((bounds.center().z - (-2.0)).abs() < TOL);
    }

    #[test]
    fn test_find_closest_sample_index() {
        let times = vec![0.0, 1.0, 2.0];

        assert_eq!(find_closest_sample_index(&times, 0.4), Some(0));
        assert_eq!(find_closest_sample_index(&times, 1.2), Some(1));
        assert_eq!(find_closest_sample_index(&times, 1.8), Some(2));
        assert_eq!(find_closest_sample_index(&times, 5.0), Some(2));
        assert_eq!(find_closest_sample_index(&times, -1.0), Some(0));
        assert_eq!(find_closest_sample_index(&[], 1.0), None);
    }

    #[test]
    fn test_to_points_flags() {
        let state = LaunchState::from_components(0.0, 0.0, 0.0, 1.0, 9.8, 0.0);
        let traj = sample_trajectory(&state, 2.0, 5).unwrap();
        let points = traj.to_points(&state);

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].flags, vec![TrajectoryFlag::Start]);
        assert_eq!(points[2].flags, vec![TrajectoryFlag::Apex]);
        assert_eq!(points[4].flags, vec![TrajectoryFlag::End]);
        assert!(points[1].flags.is_empty());

        // speed at the apex is purely horizontal
        assert!((points[2].speed_mps - 1.0).abs() < TOL);

        // apex outside the window is not flagged
        let short = sample_trajectory(&state, 0.5, 5).unwrap();
        assert!(short
            .to_points(&state)
            .iter()
            .all(|p| !p.flags.contains(&TrajectoryFlag::Apex)));
    }
}
