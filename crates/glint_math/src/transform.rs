// Transform utilities for Mat4
//
// Extends glam::Mat4 with the pieces needed to move rays and hit data
// between world space and an instance's local space.

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::Ray;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// The upper-left 3x3 block (rotation and scale, no translation).
    fn linear_part(&self) -> Mat3;

    /// Inverse-transpose of the linear part.
    ///
    /// Normals must go through this matrix rather than the transform
    /// itself, otherwise they stop being perpendicular to the surface
    /// under non-uniform scale.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn linear_part(&self) -> Mat3 {
        Mat3::from_mat4(*self)
    }

    fn normal_matrix(&self) -> Mat3 {
        self.linear_part().inverse().transpose()
    }
}

/// Resolved matrices for one geometry instance.
///
/// `forward` maps local space to world space and is composed as
/// translation * rotation * scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    forward: Mat4,
    inverse: Mat4,
    normal: Mat3,
}

impl InstanceTransform {
    /// The identity transform: local space equals world space.
    pub const IDENTITY: InstanceTransform = InstanceTransform {
        forward: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
        normal: Mat3::IDENTITY,
    };

    /// Resolve the transform of an instance at `translation`, rotated by
    /// `rotation` and scaled per axis by `scale`.
    ///
    /// A zero scale component has no inverse; callers must not build
    /// degenerate instances.
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self::from_matrix(Mat4::from_scale_rotation_translation(
            scale,
            rotation,
            translation,
        ))
    }

    /// Resolve an arbitrary invertible local-to-world matrix.
    pub fn from_matrix(forward: Mat4) -> Self {
        Self {
            forward,
            inverse: forward.inverse(),
            normal: forward.normal_matrix(),
        }
    }

    /// Local-to-world matrix.
    pub fn forward(&self) -> Mat4 {
        self.forward
    }

    /// World-to-local matrix.
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Normal-correction matrix.
    pub fn normal(&self) -> Mat3 {
        self.normal
    }

    /// Express a world-space ray in local space.
    ///
    /// The direction is not renormalized, so a hit at parameter `t` on the
    /// local ray lies at the same `t` on the world ray.
    pub fn to_local(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.inverse.transform_point3(ray.origin),
            self.inverse.transform_vector3(ray.direction),
        )
    }

    /// Map a local-space point to world space.
    pub fn to_world(&self, point: Vec3) -> Vec3 {
        self.forward.transform_point3(point)
    }

    /// Map a local-space normal to a unit world-space normal.
    pub fn to_world_normal(&self, normal: Vec3) -> Vec3 {
        (self.normal * normal).normalize()
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
