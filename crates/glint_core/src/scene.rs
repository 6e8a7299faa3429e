//! Scene description types for glint.
//!
//! A `Scene` is built once by the caller and then only read by the
//! renderer for the whole duration of a render.

use glint_math::{InstanceTransform, Quat, Vec3};

use crate::camera::Camera;
use crate::geometry::{Geometry, Shape};

/// Color type alias (linear RGB, not clamped)
pub type Color = Vec3;

/// Surface reflectance description.
///
/// A `refractive_index` of exactly zero marks an opaque surface. Any other
/// value makes the surface a dielectric that both reflects and refracts.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name, for logging
    pub name: String,

    /// Reflectance under the scene's ambient light
    pub ambient: Color,

    /// Lambertian reflectance under point lights
    pub diffuse: Color,

    /// Weight of the mirror (and refracted) contribution
    pub specular: Color,

    /// Index of refraction, 0 = opaque
    pub refractive_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::splat(0.1),
            diffuse: Color::splat(0.5), // Grey default
            specular: Color::ZERO,
            refractive_index: 0.0,
        }
    }
}

impl Material {
    /// Create an opaque material with the given diffuse color.
    ///
    /// Ambient reflectance follows the diffuse color.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            ambient: diffuse,
            diffuse,
            ..Default::default()
        }
    }

    /// Set the ambient reflectance.
    pub fn with_ambient(mut self, ambient: Color) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the diffuse reflectance.
    pub fn with_diffuse(mut self, diffuse: Color) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Set the specular reflectance.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    /// Set the refractive index (0 = opaque).
    pub fn with_refractive_index(mut self, refractive_index: f32) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Check if this material refracts light.
    pub fn is_dielectric(&self) -> bool {
        self.refractive_index != 0.0
    }
}

/// Distance falloff coefficients of a point light.
///
/// Only the rasterized preview applies these; the ray tracer carries
/// them unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }
}

/// An infinitesimal light at a position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub attenuation: Attenuation,
}

impl PointLight {
    /// Create a light with no falloff.
    pub fn new(position: Vec3, color: Color) -> Self {
        Self {
            position,
            color,
            attenuation: Attenuation::default(),
        }
    }

    /// Set the falloff coefficients.
    pub fn with_attenuation(mut self, attenuation: Attenuation) -> Self {
        self.attenuation = attenuation;
        self
    }
}

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the per-axis scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Compute the forward, inverse and normal matrices.
    pub fn resolve(&self) -> InstanceTransform {
        InstanceTransform::new(self.translation, self.rotation, self.scale)
    }
}

/// Everything a render reads.
pub struct Scene {
    /// Scene name, for logging
    pub name: String,

    /// Geometry instances, scanned in this order
    pub geometries: Vec<Geometry>,

    /// Point lights
    pub lights: Vec<PointLight>,

    /// Ambient light color
    pub ambient_light: Color,

    /// Color of rays that hit nothing
    pub background_color: Color,

    /// Refractive index of the medium the camera sits in
    pub refractive_index: f32,

    /// Viewpoint
    pub camera: Camera,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            name: String::new(),
            geometries: Vec::new(),
            lights: Vec::new(),
            ambient_light: Color::ZERO,
            background_color: Color::ZERO,
            refractive_index: 1.0,
            camera: Camera::default(),
        }
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a shape placed by `transform` and return its index.
    pub fn add_geometry(&mut self, shape: impl Shape + 'static, transform: Transform) -> usize {
        let id = self.geometries.len();
        self.geometries.push(Geometry::new(Box::new(shape), transform));
        id
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Set the camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Set the ambient light color.
    pub fn with_ambient_light(mut self, color: Color) -> Self {
        self.ambient_light = color;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the refractive index of the surrounding medium.
    pub fn with_refractive_index(mut self, refractive_index: f32) -> Self {
        self.refractive_index = refractive_index;
        self
    }

    /// Get geometry instance count.
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
