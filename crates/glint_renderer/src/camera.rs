//! Pinhole ray generation.

use glint_core::Camera;
use glint_math::Ray;

/// Generate the primary ray through the center of pixel `(x, y)`.
///
/// The image plane sits `near_clip` in front of the eye. Row 0 is at the
/// bottom of the view (most negative offset along `up`), column 0 on the
/// left.
pub fn generate_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;

    let extent = camera.near_clip * (camera.fov_y / 2.0).tan();
    let pixel_height = extent / half_height;
    let pixel_width = extent * camera.aspect / half_width;

    let x0 = x as f32 - half_width + 0.5;
    let y0 = y as f32 - half_height + 0.5;

    let direction = camera.near_clip * camera.direction
        + y0 * pixel_height * camera.up
        + x0 * pixel_width * camera.right();

    Ray::new(camera.position, direction.normalize())
}
