//! Nearest-hit search across every geometry instance of a scene.
//!
//! There is no acceleration structure: each query transforms the ray into
//! the local space of every instance in turn and keeps the closest hit.
//! Hit parameters are comparable across instances because local rays keep
//! their unnormalized direction.

use glint_core::{Material, Scene};
use glint_math::{Interval, Ray, Vec3};

/// A hit, with both the local data reported by the shape and the
/// world-space data derived from it.
#[derive(Debug, Clone, Copy)]
pub struct HitResult<'s> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the instance that was hit
    pub geometry: usize,
    /// Hit point in the instance's local space
    pub local_position: Vec3,
    /// Outward normal in the instance's local space
    pub local_normal: Vec3,
    /// Hit point in world space
    pub position: Vec3,
    /// Unit outward normal in world space
    pub normal: Vec3,
    /// Material at the hit point
    pub material: &'s Material,
}

/// Find the closest hit of `ray` inside `ray_t`, over all instances.
///
/// An instance replaces the current nearest hit only when it is strictly
/// closer, so on an exact tie the instance earlier in the scene wins.
pub fn find_nearest<'s>(scene: &'s Scene, ray: &Ray, ray_t: Interval) -> Option<HitResult<'s>> {
    let mut closest = ray_t;
    let mut nearest = None;

    for (index, geometry) in scene.geometries.iter().enumerate() {
        if let Some(hit) = geometry.hit_local(ray, closest) {
            closest = closest.shrink(hit.t);
            nearest = Some((index, hit));
        }
    }

    let (index, hit) = nearest?;
    let resolved = scene.geometries[index].resolved();

    Some(HitResult {
        t: hit.t,
        geometry: index,
        local_position: hit.position,
        local_normal: hit.normal,
        position: resolved.to_world(hit.position),
        normal: resolved.to_world_normal(hit.normal),
        material: hit.material,
    })
}

/// Check whether anything lies on `ray` inside `ray_t`.
///
/// Stops at the first instance that reports a hit.
pub fn occluded(scene: &Scene, ray: &Ray, ray_t: Interval) -> bool {
    scene
        .geometries
        .iter()
        .any(|geometry| geometry.hit_local(ray, ray_t).is_some())
}
