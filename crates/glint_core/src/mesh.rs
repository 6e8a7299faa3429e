//! Triangle mesh data for glint scenes.
//!
//! Meshes are plain indexed triangle lists in local space. Indices are
//! validated on construction so intersection code can index freely.

use glint_math::Vec3;
use thiserror::Error;

/// Errors produced when building a mesh.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Got {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
}

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
///
/// Triangles wind counter-clockwise when seen from the side their face
/// normal points to. Fields are only reachable through the validating
/// constructors, so every index is in range.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    positions: Vec<Vec3>,

    /// Vertex normals (optional, one per vertex)
    normals: Option<Vec<Vec3>>,

    /// Triangle indices (every 3 indices form a triangle)
    indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    pub fn new(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotMultipleOfThree(indices.len()));
        }

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                return Err(MeshError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices: positions.len(),
                });
            }
        }

        Ok(Self {
            positions,
            normals,
            indices,
        })
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Face normals are accumulated unnormalized, so larger faces weigh
    /// more. Replaces any existing normals.
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for [i0, i1, i2] in self.triangles() {
            let p0 = self.positions[i0];
            let edge1 = self.positions[i1] - p0;
            let edge2 = self.positions[i2] - p0;
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        let mut isolated = 0;
        for normal in &mut normals {
            let len = normal.length();
            if len > 0.0 {
                *normal /= len;
            } else {
                isolated += 1;
                *normal = Vec3::Y; // Default up normal for degenerate cases
            }
        }

        if isolated > 0 {
            log::warn!(
                "{} of {} vertices belong to no face with area, defaulting their normal to +Y",
                isolated,
                normals.len()
            );
        }

        self.normals = Some(normals);
    }

    /// Drop the vertex normals, keeping positions and faces.
    pub fn without_normals(mut self) -> Self {
        self.normals = None;
        self
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Vertex normals, one per position, if present.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Iterate over the vertex indices of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|face| [face[0] as usize, face[1] as usize, face[2] as usize])
    }

    /// Build an axis-aligned box from `min` to `max` with outward faces.
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let positions = vec![
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 3, 2, 0, 2, 1, // -Z
            4, 5, 6, 4, 6, 7, // +Z
            0, 4, 7, 0, 7, 3, // -X
            1, 2, 6, 1, 6, 5, // +X
            0, 1, 5, 0, 5, 4, // -Y
            3, 7, 6, 3, 6, 2, // +Y
        ];

        Self {
            positions,
            normals: None,
            indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new(unit_triangle(), vec![0, 1, 2], None).unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_normals());
    }

    #[test]
    fn test_rejects_partial_face() {
        let err = Mesh::new(unit_triangle(), vec![0, 1], None).unwrap_err();
        assert_eq!(err, MeshError::IndexCountNotMultipleOfThree(2));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = Mesh::new(unit_triangle(), vec![0, 1, 3], None).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_rejects_normal_mismatch() {
        let err = Mesh::new(unit_triangle(), vec![0, 1, 2], Some(vec![Vec3::Z])).unwrap_err();
        assert_eq!(
            err,
            MeshError::NormalCountMismatch {
                normals: 1,
                vertices: 3
            }
        );
    }

    #[test]
    fn test_compute_normals() {
        // CCW winding viewed from +Z produces normal pointing +Z
        let mut mesh = Mesh::new(unit_triangle(), vec![0, 1, 2], None).unwrap();
        mesh.compute_normals();

        assert!(mesh.has_normals());
        for normal in mesh.normals().unwrap() {
            assert!((normal.z - 1.0).abs() < 0.001);
        }
    }

    #[test]
    fn test_triangles_iterator() {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0), // v0
            Vec3::new(1.0, 0.0, 0.0), // v1
            Vec3::new(0.0, 1.0, 0.0), // v2
            Vec3::new(1.0, 1.0, 0.0), // v3
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2, 1, 3, 2], None).unwrap();
        let triangles: Vec<_> = mesh.triangles().collect();

        assert_eq!(triangles, vec![[0, 1, 2], [1, 3, 2]]);
    }

    #[test]
    fn test_cuboid_faces_point_outward() {
        let mesh = Mesh::cuboid(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert_eq!(mesh.triangle_count(), 12);

        for [i0, i1, i2] in mesh.triangles() {
            let p0 = mesh.positions()[i0];
            let p1 = mesh.positions()[i1];
            let p2 = mesh.positions()[i2];
            let normal = (p1 - p0).cross(p2 - p0);
            let centroid = (p0 + p1 + p2) / 3.0;

            // Box is centered at the origin, so outward means away from it
            assert!(normal.dot(centroid) > 0.0, "face {:?} points inward", [i0, i1, i2]);
        }
    }

    #[test]
    fn test_without_normals_keeps_geometry() {
        let mut mesh = Mesh::cuboid(Vec3::ZERO, Vec3::ONE);
        mesh.compute_normals();
        let flat = mesh.clone().without_normals();

        assert!(!flat.has_normals());
        assert_eq!(flat.positions(), mesh.positions());
        assert!(flat.triangles().eq(mesh.triangles()));
    }
}
