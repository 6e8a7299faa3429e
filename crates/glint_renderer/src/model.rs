//! Triangle mesh shape.

use glint_core::{LocalHit, Material, Mesh, Shape};
use glint_math::{Interval, Ray};

use crate::triangle::intersect_triangle;

/// A mesh with a single material, tested triangle by triangle.
pub struct Model {
    mesh: Mesh,
    material: Material,
}

impl Model {
    /// Create a model. Meshes without normals get smooth ones computed.
    pub fn new(mut mesh: Mesh, material: Material) -> Self {
        if !mesh.has_normals() {
            mesh.compute_normals();
        }
        log::debug!(
            "Created Model '{}': {} triangles, {} vertices",
            material.name,
            mesh.triangle_count(),
            mesh.vertex_count()
        );
        Self { mesh, material }
    }

    /// Create a model shaded with its face normals.
    pub fn flat(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh: mesh.without_normals(),
            material,
        }
    }

    /// Get the mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Shape for Model {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
        let positions = self.mesh.positions();
        let mut closest = ray_t;
        let mut found = None;

        for face in self.mesh.triangles() {
            let [i0, i1, i2] = face;
            if let Some(hit) =
                intersect_triangle(ray, closest, positions[i0], positions[i1], positions[i2])
            {
                closest = closest.shrink(hit.t);
                found = Some((face, hit));
            }
        }

        let ([i0, i1, i2], hit) = found?;
        let normal = match self.mesh.normals() {
            Some(normals) => {
                (1.0 - hit.u - hit.v) * normals[i0] + hit.u * normals[i1] + hit.v * normals[i2]
            }
            None => (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]),
        }
        .normalize();

        Some(LocalHit {
            t: hit.t,
            position: ray.at(hit.t),
            normal,
            material: &self.material,
        })
    }
}
