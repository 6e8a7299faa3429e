//! Glint Core - Scene description for the glint ray tracer.
//!
//! This crate provides the renderer-agnostic scene types:
//!
//! - **Surface data**: `Material`, `PointLight`, `Camera`
//! - **Geometry**: the `Shape` capability, `Geometry` instances with
//!   their `Transform`, and triangle `Mesh` data
//! - **Scene**: everything a render reads, fixed for its duration
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{Camera, Color, Material, PointLight, Scene};
//!
//! let scene = Scene::new("demo")
//!     .with_camera(Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 4.0 / 3.0))
//!     .with_background(Color::new(0.1, 0.1, 0.2));
//! ```

pub mod camera;
pub mod geometry;
pub mod mesh;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use geometry::{Geometry, LocalHit, Shape};
pub use mesh::{Mesh, MeshError};
pub use scene::{Attenuation, Color, Material, PointLight, Scene, Transform};
