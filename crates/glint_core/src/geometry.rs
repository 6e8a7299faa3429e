//! The shape capability and placed geometry instances.

use glint_math::{InstanceTransform, Interval, Ray, Vec3};

use crate::scene::{Material, Transform};

/// Record of a ray-shape intersection, in the shape's local space.
#[derive(Debug, Clone, Copy)]
pub struct LocalHit<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Outward surface normal (not flipped toward the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
}

/// Anything that can be intersected in its own local space.
pub trait Shape: Send + Sync {
    /// Test if a local-space ray hits this shape strictly inside `ray_t`.
    ///
    /// The ray direction is not necessarily unit length. Returning a hit
    /// is how a shape narrows the interval: the caller lowers `ray_t.max`
    /// to the returned `t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>>;
}

/// A shape placed in the world by a transform.
pub struct Geometry {
    shape: Box<dyn Shape>,
    transform: Transform,
    resolved: InstanceTransform,
}

impl Geometry {
    /// Place `shape` with `transform`, resolving its matrices once.
    pub fn new(shape: Box<dyn Shape>, transform: Transform) -> Self {
        let resolved = transform.resolve();
        Self {
            shape,
            transform,
            resolved,
        }
    }

    /// The transform components this instance was placed with.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The resolved forward/inverse/normal matrices.
    pub fn resolved(&self) -> &InstanceTransform {
        &self.resolved
    }

    /// Intersect a world-space ray with this instance.
    ///
    /// The returned hit is still in local space.
    pub fn hit_local(&self, world_ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
        let local_ray = self.resolved.to_local(world_ray);
        self.shape.hit(&local_ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Quat;

    /// Plane z = 0 in local space, facing +Z.
    struct Floor(Material);

    impl Shape for Floor {
        fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
            if ray.direction.z.abs() < 1e-9 {
                return None;
            }
            let t = -ray.origin.z / ray.direction.z;
            if !ray_t.surrounds(t) {
                return None;
            }
            Some(LocalHit {
                t,
                position: ray.at(t),
                normal: Vec3::Z,
                material: &self.0,
            })
        }
    }

    #[test]
    fn test_hit_local_uses_inverse_transform() {
        let geometry = Geometry::new(
            Box::new(Floor(Material::default())),
            Transform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = geometry
            .hit_local(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("ray should hit the translated plane");

        assert!((hit.t - 3.0).abs() < 1e-5);
        assert!(hit.position.z.abs() < 1e-5);
    }

    #[test]
    fn test_hit_local_respects_interval() {
        let geometry = Geometry::new(
            Box::new(Floor(Material::default())),
            Transform::from_translation(Vec3::new(0.0, 0.0, -3.0)),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(geometry.hit_local(&ray, Interval::new(0.001, 2.0)).is_none());
    }

    #[test]
    fn test_geometry_keeps_transform() {
        let transform = Transform::default()
            .with_rotation(Quat::from_rotation_x(0.5))
            .with_scale(Vec3::splat(3.0));
        let geometry = Geometry::new(Box::new(Floor(Material::default())), transform.clone());

        assert_eq!(geometry.transform(), &transform);
        assert_eq!(geometry.resolved(), &transform.resolve());
    }
}
