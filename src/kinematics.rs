//! Closed-form projectile kinematics.
//!
//! Constant acceleration `a = (0, -g, 0)` gives
//! `r(t) = r0 + v0*t + 0.5*a*t^2`, evaluated directly for any `t`
//! (negative times included). No ground plane: negative heights are valid.

use nalgebra::Vector3;
use crate::constants::G_ACCEL_MPS2;
use crate::state::LaunchState;

/// Position of the projectile at time `t`
#[inline]
pub fn position_at(state: &LaunchState, t: f64) -> Vector3<f64> {
    let r0 = &state.position;
    let v0 = &state.velocity;

    Vector3::new(
        r0.x + v0.x * t,
        r0.y + v0.y * t - 0.5 * G_ACCEL_MPS2 * t * t,
        r0.z + v0.z * t,
    )
}

/// Element-wise [`position_at`] over a sequence of times
pub fn positions_at(state: &LaunchState, times: &[f64]) -> Vec<Vector3<f64>> {
    times.iter().map(|&t| position_at(state, t)).collect()
}

/// Velocity of the projectile at time `t`
#[inline]
pub fn velocity_at(state: &LaunchState, t: f64) -> Vector3<f64> {
    let v0 = &state.velocity;
    Vector3::new(v0.x, v0.y - G_ACCEL_MPS2 * t, v0.z)
}

/// Time at which the vertical velocity crosses zero, if that happens at t >= 0
pub fn apex_time(state: &LaunchState) -> Option<f64> {
    let t = state.velocity.y / G_ACCEL_MPS2;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_position_reference_case() {
        let state = LaunchState::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let p = position_at(&state, 7.0);

        assert!((p.x - 29.0).abs() < TOL);
        assert!((p.y - (-203.1)).abs() < TOL);
        assert!((p.z - 45.0).abs() < TOL);
    }

    #[test]
    fn test_position_at_zero_is_exact() {
        let state = LaunchState::from_components(-3.25, 1e6, 0.1, 99.0, -42.0, 7.5);
        let p = position_at(&state, 0.0);
        assert_eq!(p, state.position);
    }

    #[test]
    fn test_negative_height_is_not_clamped() {
        let state = LaunchState::from_components(0.0, 0.0, 0.0, 0.0, -5.0, 0.0);
        let p = position_at(&state, 2.0);
        assert!((p.y - (-29.6)).abs() < TOL);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_negative_time_is_evaluated() {
        let state = LaunchState::from_components(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let p = position_at(&state, -1.0);
        assert!((p.x - (-1.0)).abs() < TOL);
        assert!((p.y - (-4.9)).abs() < TOL);
    }

    #[test]
    fn test_vectorized_matches_scalar() {
        let state = LaunchState::from_components(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let times = [0.0, 0.5, 1.0, 7.0, -2.0];
        let points = positions_at(&state, &times);

        assert_eq!(points.len(), times.len());
        for (p, &t) in points.iter().zip(times.iter()) {
            assert_eq!(*p, position_at(&state, t));
        }
        assert!(positions_at(&state, &[]).is_empty());
    }

    #[test]
    fn test_velocity_and_apex() {
        let state = LaunchState::from_components(0.0, 0.0, 0.0, 3.0, 19.6, -1.0);
        let v = velocity_at(&state, 1.0);
        assert!((v.y - 9.8).abs() < TOL);
        assert_eq!(v.x, 3.0);
        assert_eq!(v.z, -1.0);

        let apex = apex_time(&state).unwrap();
        assert!((apex - 2.0).abs() < TOL);
        assert!(velocity_at(&state, apex).y.abs() < TOL);

        let falling = LaunchState::from_components(0.0, 10.0, 0.0, 0.0, -1.0, 0.0);
        assert_eq!(apex_time(&falling), None);
    }
}
