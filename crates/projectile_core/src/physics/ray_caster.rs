//! Bounding-sphere segment caster
//!
//! Linear over all colliders, good for small scenes. Can be swapped for a
//! broad-phase structure without touching the tracker.

use super::{RayCaster, RayContact, SurfaceHandle};
use crate::foundation::math::Vec3;

/// A bounding sphere collider
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Fraction along `[from, to]` where the segment first touches the sphere
    ///
    /// A segment starting inside the sphere touches it at 0.
    pub fn intersect_segment(&self, from: Vec3, to: Vec3) -> Option<f32> {
        let oc = from - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }

        // Solve |from + t*d - center|^2 = radius^2 for t in [0, 1]
        let d = to - from;
        let a = d.dot(&d);
        if a <= f32::EPSILON {
            return None;
        }
        let b = 2.0 * oc.dot(&d);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        (0.0..=1.0).contains(&t).then_some(t)
    }
}

/// Horizontal ground plane at a fixed height
#[derive(Debug, Clone, Copy)]
pub struct GroundPlane {
    /// Height of the plane
    pub height: f32,
    /// Surface reported for contacts with the ground
    pub surface: SurfaceHandle,
}

impl GroundPlane {
    /// Fraction where a downward-crossing segment meets the plane
    pub fn intersect_segment(&self, from: Vec3, to: Vec3) -> Option<f32> {
        if from.z < self.height || to.z >= self.height {
            return None;
        }
        Some((from.z - self.height) / (from.z - to.z))
    }
}

/// Segment caster over bounding spheres and an optional ground plane
#[derive(Debug, Default)]
pub struct SphereRayCaster {
    colliders: Vec<(SurfaceHandle, BoundingSphere)>,
    ground: Option<GroundPlane>,
}

impl SphereRayCaster {
    /// Create an empty caster
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the collider of a surface
    pub fn insert(&mut self, surface: SurfaceHandle, sphere: BoundingSphere) {
        self.remove(surface);
        self.colliders.push((surface, sphere));
    }

    /// Remove the collider of a surface
    pub fn remove(&mut self, surface: SurfaceHandle) {
        self.colliders.retain(|(s, _)| *s != surface);
    }

    /// Set the ground plane
    pub fn set_ground(&mut self, ground: GroundPlane) {
        self.ground = Some(ground);
    }

    /// Number of sphere colliders
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl RayCaster for SphereRayCaster {
    fn ray_test(&self, from: Vec3, to: Vec3) -> Vec<RayContact> {
        let mut contacts: Vec<RayContact> = self
            .colliders
            .iter()
            .filter_map(|(surface, sphere)| {
                sphere
                    .intersect_segment(from, to)
                    .map(|fraction| RayContact { fraction, surface: *surface })
            })
            .collect();

        if let Some(ground) = &self.ground {
            if let Some(fraction) = ground.intersect_segment(from, to) {
                contacts.push(RayContact { fraction, surface: ground.surface });
            }
        }

        contacts.sort_by(|a, b| a.fraction.total_cmp(&b.fraction));
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_hits_sphere_front_face() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 10.0, 0.0), 2.0);
        let t = sphere
            .intersect_segment(Vec3::zeros(), Vec3::new(0.0, 20.0, 0.0))
            .unwrap();
        assert_relative_eq!(t, 0.4, epsilon = 1e-6);
    }

    #[test]
    fn test_segment_short_of_sphere() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 10.0, 0.0), 2.0);
        assert!(sphere
            .intersect_segment(Vec3::zeros(), Vec3::new(0.0, 5.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_segment_starting_inside() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 2.0);
        assert_eq!(
            sphere.intersect_segment(Vec3::zeros(), Vec3::new(0.0, 5.0, 0.0)),
            Some(0.0)
        );
    }

    #[test]
    fn test_contacts_sorted_nearest_first() {
        let mut caster = SphereRayCaster::new();
        caster.insert(SurfaceHandle(2), BoundingSphere::new(Vec3::new(0.0, 80.0, 0.0), 1.0));
        caster.insert(SurfaceHandle(1), BoundingSphere::new(Vec3::new(0.0, 30.0, 0.0), 1.0));
        caster.set_ground(GroundPlane { height: -10.0, surface: SurfaceHandle(0) });

        let contacts = caster.ray_test(Vec3::zeros(), Vec3::new(0.0, 100.0, -20.0));
        let surfaces: Vec<_> = contacts.iter().map(|c| c.surface).collect();
        assert_eq!(surfaces, vec![SurfaceHandle(0)]);

        let contacts = caster.ray_test(Vec3::zeros(), Vec3::new(0.0, 100.0, 0.0));
        let surfaces: Vec<_> = contacts.iter().map(|c| c.surface).collect();
        assert_eq!(surfaces, vec![SurfaceHandle(1), SurfaceHandle(2)]);
    }

    #[test]
    fn test_insert_replaces_surface_collider() {
        let mut caster = SphereRayCaster::new();
        caster.insert(SurfaceHandle(1), BoundingSphere::new(Vec3::new(0.0, 30.0, 0.0), 1.0));
        caster.insert(SurfaceHandle(1), BoundingSphere::new(Vec3::new(0.0, 60.0, 0.0), 1.0));
        assert_eq!(caster.collider_count(), 1);

        let contacts = caster.ray_test(Vec3::zeros(), Vec3::new(0.0, 100.0, 0.0));
        assert_eq!(contacts.len(), 1);
        assert_relative_eq!(contacts[0].fraction, 0.59, epsilon = 1e-5);

        caster.remove(SurfaceHandle(1));
        assert_eq!(caster.collider_count(), 0);
        assert!(caster.ray_test(Vec3::zeros(), Vec3::new(0.0, 100.0, 0.0)).is_empty());
    }

    #[test]
    fn test_ground_plane_fraction() {
        let ground = GroundPlane { height: 0.0, surface: SurfaceHandle(0) };
        let t = ground
            .intersect_segment(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 10.0, -30.0))
            .unwrap();
        assert_relative_eq!(t, 0.25);
        assert!(ground
            .intersect_segment(Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 0.0, -2.0))
            .is_none());
    }
}
