//! Glint Renderer - recursive Whitted-style ray tracing on the CPU.
//!
//! One ray per pixel, an exhaustive nearest-hit scan over every geometry
//! instance, shadowed point lights, and bounded mirror/refraction
//! recursion. Rendering is single-threaded and can be spread across many
//! short calls through [`Raytracer::advance`].
//!
//! # Example
//!
//! ```ignore
//! use glint_renderer::{Raytracer, Sphere};
//!
//! let mut raytracer = Raytracer::new(&scene, 800, 600)?;
//! while !raytracer.advance(Some(Duration::from_millis(16))) {
//!     // present raytracer.image()
//! }
//! ```

mod camera;
mod intersector;
mod model;
mod raytracer;
mod renderer;
mod shader;
mod sphere;
mod triangle;

pub use camera::generate_ray;
pub use intersector::{find_nearest, occluded, HitResult};
pub use model::Model;
pub use raytracer::{RenderError, RenderState, Raytracer};
pub use renderer::{clamp_01, color_to_rgba, ImageBuffer, RenderConfig};
pub use shader::{reflect, refract, schlick, shade};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export scene types from glint_core
pub use glint_core::{Camera, Color, Material, Mesh, PointLight, Scene, Shape, Transform};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
