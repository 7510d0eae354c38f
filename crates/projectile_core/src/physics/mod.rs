//! Physics module for segment collision queries
//!
//! The tracker only needs one primitive from the physics engine: every contact
//! along the segment an entity travelled this frame, ordered by distance.

mod ray_caster;

pub use ray_caster::{BoundingSphere, GroundPlane, SphereRayCaster};

use crate::foundation::math::Vec3;

/// Opaque identifier of a collision surface, resolvable to a world object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceHandle(pub u32);

/// One intersection along a queried segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayContact {
    /// Position along the segment in `[0, 1]`
    pub fraction: f32,
    /// Surface that was crossed
    pub surface: SurfaceHandle,
}

/// Segment collision query
pub trait RayCaster {
    /// All contacts along `[from, to]`, nearest first; may be empty
    fn ray_test(&self, from: Vec3, to: Vec3) -> Vec<RayContact>;
}
