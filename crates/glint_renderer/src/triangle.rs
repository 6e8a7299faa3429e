//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use glint_core::{LocalHit, Material, Shape};
use glint_math::{Interval, Ray, Vec3};

/// Barycentric hit on a triangle: parameter `t` and weights `u`, `v` of
/// the second and third vertex.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

/// Möller-Trumbore ray-triangle intersection. Both faces are hit.
pub(crate) fn intersect_triangle(
    ray: &Ray,
    ray_t: Interval,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray.direction().cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < 1e-8 {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin() - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction().dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    if !ray_t.surrounds(t) {
        return None;
    }

    Some(TriangleHit { t, u, v })
}

/// A triangle primitive.
pub struct Triangle {
    vertices: [Vec3; 3],
    /// Per-vertex normals for smooth shading, face normal otherwise
    normals: Option<[Vec3; 3]>,
    /// Pre-computed face normal (unit length)
    face_normal: Vec3,
    material: Material,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The face normal follows counter-clockwise winding.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let face_normal = (v1 - v0).cross(v2 - v0).normalize();

        Self {
            vertices: [v0, v1, v2],
            normals: None,
            face_normal,
            material,
        }
    }

    /// Attach per-vertex normals (for smooth shading).
    pub fn with_normals(mut self, n0: Vec3, n1: Vec3, n2: Vec3) -> Self {
        self.normals = Some([n0.normalize(), n1.normalize(), n2.normalize()]);
        self
    }

    /// Get the face normal.
    pub fn face_normal(&self) -> Vec3 {
        self.face_normal
    }
}

impl Shape for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
        let [v0, v1, v2] = self.vertices;
        let hit = intersect_triangle(ray, ray_t, v0, v1, v2)?;

        let normal = match self.normals {
            Some([n0, n1, n2]) => {
                ((1.0 - hit.u - hit.v) * n0 + hit.u * n1 + hit.v * n2).normalize()
            }
            None => self.face_normal,
        };

        Some(LocalHit {
            t: hit.t,
            position: ray.at(hit.t),
            normal,
            material: &self.material,
        })
    }
}
