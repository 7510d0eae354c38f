//! Math utilities and types
//!
//! World space is Z-up. Every projectile and bolt model is authored facing +Y,
//! so `REFERENCE_FORWARD` is the axis orientations are measured from.

pub use nalgebra::{Vector3, UnitQuaternion, Unit};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Forward axis of every in-flight model in its own space
pub const REFERENCE_FORWARD: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Rigid transform: position and rotation, no scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform {
    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// World-space direction the model is facing (unit length)
    pub fn forward(&self) -> Vec3 {
        forward_of(&self.rotation)
    }
}

/// World-space forward axis of a rotation, normalized
pub fn forward_of(rotation: &Quat) -> Vec3 {
    (rotation * REFERENCE_FORWARD).normalize()
}

/// Orientation built from heading and pitch only
///
/// Yaw turns about -Z, pitch about -X, applied pitch first. Roll never
/// contributes, so a tilted actor still launches a level bolt.
pub fn orientation_from_yaw_pitch(yaw: f32, pitch: f32) -> Quat {
    // Rotating by an angle about -Z equals rotating by its negation about +Z.
    let heading = Quat::from_axis_angle(&Vec3::z_axis(), -yaw);
    let tilt = Quat::from_axis_angle(&Vec3::x_axis(), -pitch);
    heading * tilt
}

/// Shortest rotation carrying `from` onto `to`
///
/// Returns `None` when `to` has no usable direction (zero length or not
/// finite). Opposite vectors get a half turn about Z.
pub fn rotation_to(from: &Vec3, to: &Vec3) -> Option<Quat> {
    let length_squared = to.norm_squared();
    if !length_squared.is_finite() || length_squared <= f32::EPSILON {
        return None;
    }

    Some(Quat::rotation_between(from, to).unwrap_or_else(|| {
        Quat::from_axis_angle(&Vec3::z_axis(), constants::PI)
    }))
}

/// Point at `fraction` of the way along the segment `[from, to]`
pub fn segment_point(from: &Vec3, to: &Vec3, fraction: f32) -> Vec3 {
    from + (to - from) * fraction
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_faces_reference_forward() {
        let transform = Transform::default();
        assert_relative_eq!(transform.forward(), REFERENCE_FORWARD);
    }

    #[test]
    fn test_yaw_turns_clockwise_seen_from_above() {
        // Quarter turn of heading swings +Y towards +X.
        let rotation = orientation_from_yaw_pitch(constants::HALF_PI, 0.0);
        assert_relative_eq!(forward_of(&rotation), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_tilts_forward_axis() {
        let rotation = orientation_from_yaw_pitch(0.0, utils::deg_to_rad(30.0));
        let forward = forward_of(&rotation);
        assert_relative_eq!(forward.norm(), 1.0, epsilon = 1e-6);
        assert!(forward.z < 0.0, "positive pitch looks down, got {forward:?}");
        assert_relative_eq!(forward.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_to_velocity() {
        let velocity = Vec3::new(0.0, 10.0, -10.0);
        let rotation = rotation_to(&REFERENCE_FORWARD, &velocity).unwrap();
        assert_relative_eq!(forward_of(&rotation), velocity.normalize(), epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_to_opposite_direction() {
        let rotation = rotation_to(&REFERENCE_FORWARD, &-REFERENCE_FORWARD).unwrap();
        assert_relative_eq!(forward_of(&rotation), -REFERENCE_FORWARD, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_to_zero_vector() {
        assert!(rotation_to(&REFERENCE_FORWARD, &Vec3::zeros()).is_none());
    }

    #[test]
    fn test_segment_midpoint() {
        let from = Vec3::new(0.0, 0.0, 100.0);
        let to = Vec3::new(0.0, 50.0, 80.0);
        assert_relative_eq!(segment_point(&from, &to, 0.5), Vec3::new(0.0, 25.0, 90.0));
    }
}
