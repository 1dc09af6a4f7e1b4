//! Built-in demo scene, rendered when no scene file is given.

use crate::scene_file::RenderSetup;
use glint_math::Vec3;
use glint_renderer::{color, Camera, Material, Plane, RenderConfig, Scene, Sphere, Viewport};
use std::f32::consts::FRAC_PI_4;

/// Three spheres over a gray floor, lit from the upper right.
pub fn setup() -> RenderSetup {
    let camera = Camera::new(Vec3::new(0.0, 40.0, 500.0), Vec3::new(0.0, 0.0, 0.0), FRAC_PI_4);
    let mut scene =
        Scene::new(camera, Vec3::new(300.0, 400.0, 500.0)).with_background(color::from_hsv(0.6, 0.4, 0.25));

    // Floor
    scene.add(Plane::new(
        Vec3::new(0.0, 1.0, 0.0),
        80.0,
        Material::new(Vec3::new(0.45, 0.45, 0.45), 0.8, 0.1),
    ));

    // Hero sphere, mildly reflective
    scene.add(Sphere::new(
        Vec3::new(-90.0, 0.0, -60.0),
        80.0,
        Material::new(color::RED, 0.7, 0.3),
    ));

    scene.add(Sphere::new(
        Vec3::new(110.0, -20.0, 40.0),
        60.0,
        Material::new(Vec3::new(0.2, 0.4, 0.9), 0.9, 0.05),
    ));

    // Small near-mirror ball
    scene.add(Sphere::new(
        Vec3::new(10.0, -50.0, 140.0),
        30.0,
        Material::new(Vec3::new(0.9, 0.9, 0.9), 0.3, 0.7),
    ));

    RenderSetup {
        scene,
        viewport: Viewport::with_default_distance(640, 480),
        config: RenderConfig::default(),
    }
}
