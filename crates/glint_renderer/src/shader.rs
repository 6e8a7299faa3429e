//! Recursive color evaluation.
//!
//! Each hit gets an ambient term, a shadow-tested diffuse term per point
//! light, and then either a mirror reflection (opaque materials) or a
//! Fresnel-weighted mix of reflection and refraction (dielectrics). The
//! recursion depth travels as a plain argument.

use glint_core::{Color, Scene};
use glint_math::{Interval, Ray, Vec3};

use crate::intersector::{find_nearest, occluded, HitResult};
use crate::RenderConfig;

/// Compute the color seen along a world-space ray.
///
/// `depth` is 0 for camera rays. Reflection and refraction rays are only
/// spawned while `depth + 1 <= config.max_depth`, so a ray path is shaded
/// at most `max_depth + 1` levels deep.
pub fn shade(scene: &Scene, ray: &Ray, depth: u32, config: &RenderConfig) -> Color {
    let hit = match find_nearest(scene, ray, Interval::new(config.epsilon, config.max_distance)) {
        Some(hit) => hit,
        None => return scene.background_color,
    };

    let material = hit.material;
    let mut color = material.ambient * scene.ambient_light;
    color += direct_lighting(scene, &hit, config);

    if depth >= config.max_depth {
        return color;
    }

    let incoming = ray.direction();
    let normal = hit.normal;
    let reflection = Ray::new(hit.position, reflect(incoming, normal).normalize());
    let next = depth + 1;

    if !material.is_dielectric() {
        return color + material.specular * shade(scene, &reflection, next, config);
    }

    let ratio = scene.refractive_index / material.refractive_index;
    let cos_incoming = incoming.dot(normal);

    let refracted = if cos_incoming < 0.0 {
        // Entering the material
        refract(incoming, normal, ratio).map(|direction| (direction, -cos_incoming))
    } else {
        // Leaving it: flip the normal so it faces the ray
        refract(incoming, -normal, 1.0 / ratio).map(|direction| (direction, direction.dot(normal)))
    };

    let (direction, cosine) = match refracted {
        Some(refracted) => refracted,
        // Total internal reflection replaces the whole result
        None => return material.specular * shade(scene, &reflection, next, config),
    };

    let reflectance = schlick(cosine, material.refractive_index);
    let refraction = Ray::new(hit.position, direction);

    color
        + material.specular
            * (reflectance * shade(scene, &reflection, next, config)
                + (1.0 - reflectance) * shade(scene, &refraction, next, config))
}

/// Sum of the diffuse contributions of every light that sees the hit.
///
/// Lights behind the surface are skipped before any shadow ray is cast.
/// Attenuation coefficients are not applied.
fn direct_lighting(scene: &Scene, hit: &HitResult<'_>, config: &RenderConfig) -> Color {
    let mut color = Color::ZERO;

    for light in &scene.lights {
        let to_light = light.position - hit.position;
        let distance = to_light.length();
        let direction = to_light / distance;

        let facing = hit.normal.dot(direction);
        if facing <= 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(hit.position, direction);
        if occluded(scene, &shadow_ray, Interval::new(config.epsilon, distance)) {
            continue;
        }

        color += hit.material.diffuse * light.color * facing;
    }

    color
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface whose unit normal faces it.
///
/// `ratio` is the index of the side the ray comes from over the index of
/// the side it goes into. Returns `None` on total internal reflection.
#[inline]
pub fn refract(v: Vec3, n: Vec3, ratio: f32) -> Option<Vec3> {
    let cos = v.dot(n);
    let k = 1.0 - ratio * ratio * (1.0 - cos * cos);
    if k <= 0.0 {
        return None;
    }
    Some((ratio * (v - n * cos) - n * k.sqrt()).normalize())
}

/// Schlick's approximation for reflectance
#[inline]
pub fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((refractive_index - 1.0) / (refractive_index + 1.0)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;
    use glint_core::{LocalHit, Material, PointLight, Shape, Transform};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn approx(a: Color, b: Color) -> bool {
        (a - b).length() < 1e-4
    }

    fn matte(diffuse: Color, ambient: Color) -> Material {
        Material::new("matte", diffuse).with_ambient(ambient)
    }

    /// Unit sphere at z = -5 in front of a camera at the origin.
    fn single_sphere(material: Material) -> Scene {
        let mut scene = Scene::new("single")
            .with_background(Color::new(0.1, 0.2, 0.3))
            .with_ambient_light(Color::splat(0.5));
        scene.add_geometry(
            Sphere::unit(material),
            Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)),
        );
        scene
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = single_sphere(Material::default());
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        let color = shade(&scene, &ray, 0, &RenderConfig::default());
        assert_eq!(color, scene.background_color);
    }

    #[test]
    fn test_no_lights_gives_ambient_only() {
        let scene = single_sphere(matte(Color::ONE, Color::new(0.2, 0.4, 0.6)));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = shade(&scene, &ray, 0, &RenderConfig::default());
        assert!(approx(color, Color::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_zero_specular_ignores_depth_bound() {
        let mut scene = single_sphere(matte(Color::splat(0.8), Color::splat(0.2)));
        scene.add_light(PointLight::new(Vec3::new(0.0, 5.0, 5.0), Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, 0.1, -1.0).normalize());

        let shallow = shade(&scene, &ray, 0, &RenderConfig::default().with_max_depth(0));
        let deep = shade(&scene, &ray, 0, &RenderConfig::default().with_max_depth(10));
        assert_eq!(shallow, deep);
    }

    #[test]
    fn test_diffuse_term_uses_cosine() {
        let mut scene = single_sphere(matte(Color::ONE, Color::ZERO));
        // Hit point is (0, 0, -4) with normal +Z; light 45 degrees up
        scene.add_light(PointLight::new(Vec3::new(0.0, 3.0, -1.0), Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = shade(&scene, &ray, 0, &RenderConfig::default());
        let expected = Vec3::new(0.0, 3.0, 3.0).normalize().dot(Vec3::Z);
        assert!(approx(color, Color::splat(expected)));
    }

    #[test]
    fn test_light_behind_surface_is_skipped() {
        let mut scene = single_sphere(matte(Color::ONE, Color::ZERO));
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.0, -20.0), Color::ONE));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = shade(&scene, &ray, 0, &RenderConfig::default());
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_shadow_depends_on_light_distance() {
        let mut scene = Scene::new("shadow");
        // Receiver, hit by the camera ray at (0, 0, -4)
        scene.add_geometry(
            Sphere::unit(matte(Color::ONE, Color::ZERO)),
            Transform::from_translation(Vec3::new(0.0, 0.0, -5.0)),
        );
        // Occluder on the 45 degree line from the hit point, off the camera ray
        scene.add_geometry(
            Sphere::new(0.25, matte(Color::ONE, Color::ZERO)),
            Transform::from_translation(Vec3::new(0.0, 1.0, -3.0)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let config = RenderConfig::default();

        // Light farther along the same line: blocked
        scene.add_light(PointLight::new(Vec3::new(0.0, 3.0, -1.0), Color::ONE));
        assert_eq!(shade(&scene, &ray, 0, &config), Color::ZERO);

        // Light closer than the occluder on the same line: lit
        scene.lights.clear();
        scene.add_light(PointLight::new(Vec3::new(0.0, 0.5, -3.5), Color::ONE));
        let color = shade(&scene, &ray, 0, &config);
        assert!((color.x - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_attenuation_not_applied() {
        let mut near = single_sphere(matte(Color::ONE, Color::ZERO));
        near.add_light(PointLight::new(Vec3::new(0.0, 0.0, 0.0), Color::ONE));
        let mut far = single_sphere(matte(Color::ONE, Color::ZERO));
        far.add_light(
            PointLight::new(Vec3::new(0.0, 0.0, 0.0), Color::ONE).with_attenuation(
                glint_core::Attenuation {
                    constant: 1.0,
                    linear: 1.0,
                    quadratic: 1.0,
                },
            ),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let config = RenderConfig::default();

        assert_eq!(shade(&near, &ray, 0, &config), shade(&far, &ray, 0, &config));
    }

    /// Wraps a shape and counts how often it is queried.
    struct Counted<S> {
        inner: S,
        calls: Arc<AtomicUsize>,
    }

    impl<S: Shape> Shape for Counted<S> {
        fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<LocalHit<'_>> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.hit(ray, ray_t)
        }
    }

    #[test]
    fn test_mirror_recursion_is_bounded() {
        // Camera inside a mirror ball: every ray hits it again
        let mirror = Material::default()
            .with_ambient(Color::splat(0.2))
            .with_specular(Color::splat(0.5));
        let calls = Arc::new(AtomicUsize::new(0));
        let mut scene = Scene::new("hall of mirrors").with_ambient_light(Color::ONE);
        scene.add_geometry(
            Counted {
                inner: Sphere::unit(mirror),
                calls: Arc::clone(&calls),
            },
            Transform::default(),
        );

        let config = RenderConfig::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.2, -1.0).normalize());
        let color = shade(&scene, &ray, 0, &config);

        // Depths below max_depth recurse, depth max_depth only shades locally
        let levels = config.max_depth as i32 + 1;
        let expected: f32 = (0..levels).map(|i| 0.2 * 0.5f32.powi(i)).sum();
        assert!(color.is_finite());
        assert!(approx(color, Color::splat(expected)));

        // No lights, so exactly one nearest-hit query per level
        assert_eq!(calls.load(Ordering::Relaxed), levels as usize);
    }

    #[test]
    fn test_index_matched_glass_is_invisible() {
        let glass = Material::default()
            .with_ambient(Color::ZERO)
            .with_diffuse(Color::ZERO)
            .with_specular(Color::ONE)
            .with_refractive_index(1.0);
        let scene = single_sphere(glass);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let color = shade(&scene, &ray, 0, &RenderConfig::default());
        assert!(approx(color, scene.background_color));
    }

    #[test]
    fn test_total_internal_reflection_drops_local_terms() {
        let glass = Material::default()
            .with_ambient(Color::ONE)
            .with_diffuse(Color::ZERO)
            .with_specular(Color::splat(0.5))
            .with_refractive_index(1.5);
        let mut scene = Scene::new("tir").with_ambient_light(Color::splat(0.4));
        scene.add_geometry(Sphere::unit(glass), Transform::default());

        // From inside, at a steep angle to the shell: sin = 0.9 > 1 / 1.5
        let ray = Ray::new(Vec3::new(0.9, 0.0, 0.0), Vec3::Z);
        let config = RenderConfig::default();
        let color = shade(&scene, &ray, 0, &config);

        // Every bounce is internal; only the last level adds its ambient term
        let expected = 0.4 * 0.5f32.powi(config.max_depth as i32);
        assert!(approx(color, Color::splat(expected)), "got {:?}", color);
    }

    /// Clear glass ball of index 1.5 at the origin, no lights.
    fn glass_ball() -> Scene {
        let glass = Material::default()
            .with_ambient(Color::ZERO)
            .with_diffuse(Color::ZERO)
            .with_specular(Color::ONE)
            .with_refractive_index(1.5);
        let mut scene = Scene::new("glass ball").with_background(Color::new(0.2, 0.4, 0.6));
        scene.add_geometry(Sphere::unit(glass), Transform::default());
        scene
    }

    /// Schlick reflectance for index 1.5, written out by hand.
    fn reflectance(cosine: f32) -> f32 {
        let r0 = 0.04;
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    #[test]
    fn test_fresnel_blend_entering() {
        let scene = glass_ball();
        // One level of recursion: the reflection escapes to the background,
        // the refraction hits the far wall and stops there with no light
        let config = RenderConfig::default().with_max_depth(1);

        // Hits at (0, 0.9, z) so the cosine to the normal is z = sqrt(0.19)
        let ray = Ray::new(Vec3::new(0.0, 0.9, 5.0), Vec3::NEG_Z);
        let r = reflectance(0.19f32.sqrt());
        assert!(r > 0.05 && r < 0.5);

        let color = shade(&scene, &ray, 0, &config);
        assert!(approx(color, r * scene.background_color), "got {:?}", color);
    }

    #[test]
    fn test_fresnel_blend_exiting() {
        let scene = glass_ball();
        let config = RenderConfig::default().with_max_depth(1);

        // From inside, hitting the shell at (0, 0.6, 0.8): incident cosine
        // 0.8, refracted cosine sqrt(1 - 1.5² (1 - 0.8²)) = sqrt(0.19)
        let ray = Ray::new(Vec3::new(0.0, 0.6, 0.0), Vec3::Z);
        let r = reflectance(0.19f32.sqrt());

        // The internal reflection hits the shell again and stops dark;
        // the refracted ray escapes to the background
        let color = shade(&scene, &ray, 0, &config);
        assert!(approx(color, (1.0 - r) * scene.background_color), "got {:?}", color);
    }

    #[test]
    fn test_reflect_mirror_law() {
        let normals = [Vec3::Y, Vec3::new(1.0, 1.0, 0.0).normalize(), Vec3::new(-0.3, 0.2, 0.9).normalize()];
        let directions = [
            Vec3::new(1.0, -1.0, 0.0).normalize(),
            Vec3::new(0.2, 0.5, -0.8).normalize(),
            Vec3::NEG_Z,
        ];

        for n in normals {
            for d in directions {
                let r = reflect(d, n);
                assert!((r.length() - 1.0).abs() < 1e-5);
                assert!((r.dot(n) + d.dot(n)).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_refract_straight_through() {
        let refracted = refract(Vec3::NEG_Z, Vec3::Z, 1.0 / 1.5).expect("normal incidence refracts");
        assert!((refracted - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let incoming = Vec3::new(1.0, 0.0, -1.0).normalize();
        let refracted = refract(incoming, Vec3::Z, 1.0 / 1.5).expect("entering never reflects totally");

        // Snell: sin_t = sin_i / 1.5
        let sin_i = incoming.x;
        assert!((refracted.x - sin_i / 1.5).abs() < 1e-5);
        assert!(refracted.z < 0.0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let incoming = Vec3::new(0.9, 0.0, (1.0f32 - 0.81).sqrt());
        assert!(refract(incoming, Vec3::NEG_Z, 1.5).is_none());
    }

    #[test]
    fn test_schlick_limits() {
        // Normal incidence gives R0
        assert!((schlick(1.0, 1.5) - 0.04).abs() < 1e-6);
        // Grazing incidence reflects everything
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-6);
        // Matched index does not reflect head-on
        assert_eq!(schlick(1.0, 1.0), 0.0);
    }
}
