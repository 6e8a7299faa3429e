//! Built-in demo scenes.

use std::f32::consts::PI;

use glint_core::{Camera, Color, Material, Mesh, MeshError, PointLight, Scene, Transform};
use glint_math::{Quat, Vec3};
use glint_renderer::{Model, Sphere, Triangle};

use crate::cli::SceneChoice;

/// Build the chosen scene for an image of the given aspect ratio.
pub fn build(choice: SceneChoice, aspect: f32) -> Result<Scene, MeshError> {
    let mut scene = match choice {
        SceneChoice::Spheres => spheres()?,
        SceneChoice::Cornell => cornell(),
        SceneChoice::Single => single(),
    };
    scene.camera.set_aspect(aspect);

    log::info!(
        "Built scene '{}': {} geometries, {} lights",
        scene.name,
        scene.geometry_count(),
        scene.light_count()
    );
    Ok(scene)
}

fn glass() -> Material {
    Material::new("glass", Color::ZERO)
        .with_specular(Color::splat(0.9))
        .with_refractive_index(1.5)
}

/// Diffuse, mirror and glass spheres next to a pyramid on a flattened box.
fn spheres() -> Result<Scene, MeshError> {
    let mut scene = Scene::new("spheres")
        .with_camera(
            Camera::new(Vec3::new(0.0, 2.5, 9.0), Vec3::new(0.0, 0.5, 0.0), 4.0 / 3.0)
                .with_fov_degrees(40.0),
        )
        .with_background(Color::new(0.45, 0.6, 0.85))
        .with_ambient_light(Color::splat(0.25));

    // Floor: unit cube squashed into a slab
    scene.add_geometry(
        Model::flat(
            Mesh::cuboid(Vec3::splat(-1.0), Vec3::splat(1.0)),
            Material::new("floor", Color::new(0.6, 0.6, 0.55)).with_specular(Color::splat(0.1)),
        ),
        Transform::from_translation(Vec3::new(0.0, -1.05, 0.0))
            .with_scale(Vec3::new(8.0, 0.05, 8.0)),
    );

    scene.add_geometry(
        Sphere::unit(Material::new("red", Color::new(0.7, 0.15, 0.1))),
        Transform::from_translation(Vec3::new(-2.2, 0.0, 0.0)),
    );
    scene.add_geometry(
        Sphere::unit(
            Material::new("mirror", Color::splat(0.05)).with_specular(Color::splat(0.85)),
        ),
        Transform::from_translation(Vec3::new(0.0, 0.0, -1.0)),
    );
    scene.add_geometry(
        Sphere::unit(glass()),
        Transform::from_translation(Vec3::new(2.2, 0.0, 0.5)),
    );
    // Ellipsoid, stretched along X and tilted
    scene.add_geometry(
        Sphere::new(0.4, Material::new("gold", Color::new(0.8, 0.6, 0.2))),
        Transform::from_translation(Vec3::new(1.0, -0.6, 2.0))
            .with_rotation(Quat::from_rotation_z(PI / 8.0))
            .with_scale(Vec3::new(2.0, 1.0, 1.0)),
    );
    scene.add_geometry(
        Model::flat(pyramid()?, Material::new("teal", Color::new(0.1, 0.5, 0.5))),
        Transform::from_translation(Vec3::new(-1.0, -1.0, 2.2))
            .with_rotation(Quat::from_rotation_y(PI / 5.0))
            .with_scale(Vec3::splat(0.6)),
    );

    scene.add_light(PointLight::new(Vec3::new(5.0, 8.0, 6.0), Color::splat(0.8)));
    scene.add_light(PointLight::new(Vec3::new(-6.0, 4.0, 3.0), Color::splat(0.3)));
    Ok(scene)
}

/// Square pyramid on the XZ plane, apex up.
fn pyramid() -> Result<Mesh, MeshError> {
    let positions = vec![
        Vec3::new(-1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, -1.0),
        Vec3::new(1.0, 0.0, 1.0),
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(0.0, 1.5, 0.0),
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  0, 2, 3, // base
        3, 2, 4,  2, 1, 4,  1, 0, 4,  0, 3, 4, // sides
    ];
    Mesh::new(positions, indices, None)
}

/// Two triangles covering the quad `corners`, wound so their face normal
/// points along `facing`.
fn quad(corners: [Vec3; 4], facing: Vec3, material: &Material) -> [Triangle; 2] {
    let [a, b, c, d] = corners;
    let [a, b, c, d] = if (b - a).cross(c - a).dot(facing) < 0.0 {
        [d, c, b, a]
    } else {
        [a, b, c, d]
    };
    [
        Triangle::new(a, b, c, material.clone()),
        Triangle::new(a, c, d, material.clone()),
    ]
}

/// Closed room of triangle walls with a rotated mesh box and a glass ball.
fn cornell() -> Scene {
    let mut scene = Scene::new("cornell")
        .with_camera(Camera::new(Vec3::new(0.0, 0.0, 3.6), Vec3::ZERO, 1.0).with_fov_degrees(40.0))
        .with_ambient_light(Color::splat(0.15));

    let white = Material::new("white", Color::splat(0.75));
    let red = Material::new("red", Color::new(0.65, 0.05, 0.05));
    let green = Material::new("green", Color::new(0.12, 0.45, 0.15));

    let p = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);
    let walls = [
        // Floor, ceiling, back
        ([p(-1., -1., 1.), p(1., -1., 1.), p(1., -1., -1.), p(-1., -1., -1.)], Vec3::Y, &white),
        ([p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.), p(-1., 1., -1.)], Vec3::NEG_Y, &white),
        ([p(-1., -1., -1.), p(1., -1., -1.), p(1., 1., -1.), p(-1., 1., -1.)], Vec3::Z, &white),
        // Left, right
        ([p(-1., -1., 1.), p(-1., -1., -1.), p(-1., 1., -1.), p(-1., 1., 1.)], Vec3::X, &red),
        ([p(1., -1., 1.), p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.)], Vec3::NEG_X, &green),
    ];
    for (corners, facing, material) in walls {
        for triangle in quad(corners, facing, material) {
            scene.add_geometry(triangle, Transform::default());
        }
    }

    scene.add_geometry(
        Model::flat(Mesh::cuboid(Vec3::splat(-0.5), Vec3::splat(0.5)), white),
        Transform::from_translation(Vec3::new(-0.35, -0.55, -0.3))
            .with_rotation(Quat::from_rotation_y(0.3))
            .with_scale(Vec3::new(0.55, 0.9, 0.55)),
    );
    scene.add_geometry(
        Sphere::new(0.3, glass()),
        Transform::from_translation(Vec3::new(0.4, -0.7, 0.2)),
    );

    scene.add_light(PointLight::new(Vec3::new(0.0, 0.9, 0.2), Color::splat(0.9)));
    scene
}

/// One diffuse sphere at the origin, lit from the camera side.
fn single() -> Scene {
    let mut scene = Scene::new("single")
        .with_camera(Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 4.0 / 3.0))
        .with_background(Color::new(0.2, 0.3, 0.5))
        .with_ambient_light(Color::ONE);
    scene.add_geometry(
        Sphere::unit(
            Material::new("clay", Color::new(0.8, 0.3, 0.2)).with_ambient(Color::splat(0.1)),
        ),
        Transform::default(),
    );
    scene.add_light(PointLight::new(Vec3::new(2.0, 3.0, 6.0), Color::ONE));
    scene
}
