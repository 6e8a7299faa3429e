//! Progressive render example.
//!
//! Renders three spheres over a floor in small time slices, the way an
//! interactive host would, and saves the result in PPM format.

use glint_renderer::{
    color_to_rgba, Camera, Color, ImageBuffer, Material, Mesh, Model, PointLight, Raytracer,
    Scene, Sphere, Transform, Vec3,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{Duration, Instant};

fn main() {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let (width, height) = (640, 360);
    let scene = build_scene(width as f32 / height as f32);

    let mut raytracer = match Raytracer::new(&scene, width, height) {
        Ok(raytracer) => raytracer,
        Err(e) => {
            eprintln!("Cannot render: {e}");
            return;
        }
    };

    // 16ms slices, as a 60 Hz frame loop would hand out
    let start = Instant::now();
    let mut slices = 0;
    while !raytracer.advance(Some(Duration::from_millis(16))) {
        slices += 1;
        if slices % 10 == 0 {
            println!("  {:.0}% after {} slices", raytracer.progress() * 100.0, slices);
        }
    }
    println!("Rendered in {:?} ({} slices)", start.elapsed(), slices + 1);

    let filename = "output.ppm";
    save_ppm(raytracer.image(), filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene(aspect: f32) -> Scene {
    let mut scene = Scene::new("simple")
        .with_camera(
            Camera::new(Vec3::new(0.0, 2.0, 9.0), Vec3::new(0.0, 0.5, 0.0), aspect)
                .with_fov_degrees(35.0),
        )
        .with_background(Color::new(0.5, 0.7, 1.0))
        .with_ambient_light(Color::splat(0.3));

    // Ground
    scene.add_geometry(
        Model::flat(
            Mesh::cuboid(Vec3::new(-10.0, -0.1, -10.0), Vec3::new(10.0, 0.0, 10.0)),
            Material::new("ground", Color::new(0.5, 0.5, 0.5)),
        ),
        Transform::default(),
    );

    // Three main spheres
    scene.add_geometry(
        Sphere::unit(
            Material::new("glass", Color::ZERO)
                .with_specular(Color::ONE)
                .with_refractive_index(1.5),
        ),
        Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
    );
    scene.add_geometry(
        Sphere::unit(Material::new("clay", Color::new(0.4, 0.2, 0.1))),
        Transform::from_translation(Vec3::new(-2.5, 1.0, -0.5)),
    );
    scene.add_geometry(
        Sphere::unit(
            Material::new("metal", Color::new(0.1, 0.1, 0.1))
                .with_specular(Color::new(0.7, 0.6, 0.5)),
        ),
        Transform::from_translation(Vec3::new(2.5, 1.0, -0.5)),
    );

    scene.add_light(PointLight::new(Vec3::new(4.0, 8.0, 6.0), Color::ONE));
    println!("Created {} objects", scene.geometry_count());
    scene
}

fn save_ppm(image: &ImageBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    // PPM starts at the top; row 0 of the buffer is the bottom
    for y in (0..image.height).rev() {
        for x in 0..image.width {
            let rgba = color_to_rgba(image.get(x, y));
            writeln!(writer, "{} {} {}", rgba[0], rgba[1], rgba[2])?;
        }
    }

    Ok(())
}
