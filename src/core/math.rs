// Math utilities for camera-relative movement

use glam::{Vec2, Vec3};

/// Intent magnitude below which input counts as "no input".
pub const INTENT_EPSILON: f32 = f32::EPSILON;

/// Ground-plane basis vectors for a facing yaw (radians).
///
/// Yaw zero faces +Z; positive yaw turns the character toward +X, so the
/// right vector stays on the character's right hand.
pub fn yaw_basis(yaw: f32) -> (Vec3, Vec3) {
    let (sin, cos) = yaw.sin_cos();
    let forward = Vec3::new(sin, 0.0, cos);
    let right = Vec3::new(cos, 0.0, -sin);
    (forward, right)
}

/// Resolve a raw two-axis intent into a unit planar direction for the given
/// facing. Returns `Vec3::ZERO` when the intent is below [`INTENT_EPSILON`].
pub fn planar_direction(intent: Vec2, yaw: f32) -> Vec3 {
    let (forward, right) = yaw_basis(yaw);
    let raw = right * intent.x + forward * intent.y;
    if raw.length() >= INTENT_EPSILON {
        raw.normalize()
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_yaw_basis_at_zero() {
        let (forward, right) = yaw_basis(0.0);
        assert_relative_eq!(forward.z, 1.0);
        assert_relative_eq!(right.x, 1.0);
    }

    #[test]
    fn test_yaw_basis_orthonormal() {
        for yaw in [0.0, 0.7, -1.3, std::f32::consts::PI] {
            let (forward, right) = yaw_basis(yaw);
            assert_relative_eq!(forward.length(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(right.length(), 1.0, epsilon = 1e-6);
            assert_relative_eq!(forward.dot(right), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_planar_direction_zero_intent() {
        assert_eq!(planar_direction(Vec2::ZERO, 0.4), Vec3::ZERO);
    }

    #[test]
    fn test_planar_direction_is_normalized() {
        let dir = planar_direction(Vec2::new(1.0, 1.0), 0.0);
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_planar_direction_forward_intent_follows_facing() {
        let dir = planar_direction(Vec2::new(0.0, 1.0), 0.0);
        assert_relative_eq!(dir.z, 1.0, epsilon = 1e-6);
    }
}
