//! Sphere primitive for ray tracing.

use glint_core::{LocalHit, Material, Shape};
use glint_math::{Interval, Ray};

/// A sphere centered at the local origin.
///
/// Place and stretch it with the instance transform; an ellipsoid is a
/// unit sphere with a non-uniform scale.
pub struct Sphere {
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(radius: f32, material: Material) -> Self {
        Self {
            radius: radius.max(0.0),
            material,
        }
    }

    /// Create a sphere of radius one.
    pub fn unit(material: Material) -> Self {
        Self::new(1.0, material)
    }

    /// Get the radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
        let oc = -ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let position = ray.at(root);
        Some(LocalHit {
            t: root,
            position,
            normal: position / self.radius,
            material: &self.material,
        })
    }
}
