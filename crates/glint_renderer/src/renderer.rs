//! Recursive ray tracing renderer.
//!
//! One primary ray per pixel (or per grid node under block interpolation),
//! shaded with a diffuse term, hard shadows, and mirror reflection bounded
//! by a fixed recursion budget.

use crate::{primitive::NO_HIT, Color, ImageBuffer, Primitive, Scene, Viewport};
use glint_math::Ray;
use rayon::prelude::*;

/// Offset subtracted from the light distance in the occlusion test so a
/// surface cannot shadow itself at its own hit point.
pub const SHADOW_BIAS: f32 = 0.001;

/// Recursion budget handed to top-level rays: at most one mirror bounce.
pub const INITIAL_TRACE_DEPTH: u32 = 1;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Block interpolation factor. 0 disables interpolation; a value > 0
    /// traces rays only at the corners of `interpolation`-pixel blocks and
    /// fills the interiors bilinearly. Must divide both viewport
    /// dimensions.
    pub interpolation: u32,
    /// Whether hit points spawn mirror-reflection rays.
    pub reflections: bool,
    /// Whether hit points are tested for light occlusion.
    pub shadows: bool,
    /// Multiplier applied to occluded hit points.
    pub shadow_factor: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interpolation: 0,
            reflections: true,
            shadows: true,
            shadow_factor: 1.0 / 1.6,
        }
    }
}

/// Ray-casting renderer.
///
/// Owns viewport geometry and configuration; borrows a scene and an image
/// sink per render call and keeps no other state across calls.
pub struct Renderer {
    pub viewport: Viewport,
    pub config: RenderConfig,
}

impl Renderer {
    /// Create a renderer with the default configuration.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            config: RenderConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Trace one ray into the scene and shade whatever it hits.
    ///
    /// Returns the scene background when the ray escapes. `depth` is the
    /// number of mirror bounces this call may still spawn.
    pub fn trace_ray(&self, scene: &Scene, ray: &Ray, depth: u32) -> Color {
        // Nearest hit. Strictly-closer comparison, so ties go to the
        // earliest primitive in scene order.
        let mut hit_distance = NO_HIT;
        let mut hit: Option<&dyn Primitive> = None;
        for primitive in scene.primitives() {
            let d = primitive.intersect(ray);
            if d < hit_distance {
                hit_distance = d;
                hit = Some(primitive.as_ref());
            }
        }

        let Some(primitive) = hit else {
            return scene.background;
        };

        let hit_point = ray.at(hit_distance);
        // Aimed light-to-point, so its target_distance is the light
        // distance used by the occlusion test below.
        let light_ray = Ray::aimed_at(scene.light, hit_point);

        let normal = primitive.normal_at(hit_point);
        let base = primitive.color_at(hit_point, normal);

        let material = primitive.material();
        let diffuse = material.diffuse;
        let light_dot = diffuse * normal.dot(light_ray.direction);

        // Additive diffuse term plus attenuated base color, unclamped.
        let mut color = Color::new(
            light_dot + base.x * (1.0 - diffuse),
            light_dot + base.y * (1.0 - diffuse),
            light_dot + base.z * (1.0 - diffuse),
        );

        if self.config.shadows {
            let light_distance = light_ray.target_distance - SHADOW_BIAS;
            for occluder in scene.primitives() {
                if occluder.intersect(&light_ray) < light_distance {
                    // One occluder is enough; which one is irrelevant.
                    color *= self.config.shadow_factor;
                    break;
                }
            }
        }

        if self.config.reflections && depth > 0 && material.reflection > 0.0 {
            let rho = 2.0 * normal.dot(ray.direction);
            let reflected_dir = ray.direction - normal * rho;
            // The origin steps a full direction vector off the surface,
            // not an epsilon nudge; that offset is the self-intersection
            // guard.
            let reflected_ray = Ray::new(hit_point + reflected_dir, reflected_dir);
            let reflected = self.trace_ray(scene, &reflected_ray, depth - 1);
            color = color.lerp(reflected, material.reflection);
        }

        color
    }

    /// Render the scene into `image`.
    pub fn render(&self, scene: &Scene, image: &mut ImageBuffer) {
        self.render_with_progress(scene, image, |_| {});
    }

    /// Render the scene, invoking `after_each_line` with each traced row
    /// index as the row completes.
    ///
    /// Columns within a row are traced in parallel; rows run sequentially,
    /// so the callback fires in row order. With interpolation enabled the
    /// row indices are grid rows, not pixel rows.
    pub fn render_with_progress<F>(&self, scene: &Scene, image: &mut ImageBuffer, mut after_each_line: F)
    where
        F: FnMut(u32),
    {
        let mut cols = self.viewport.width;
        let mut rows = self.viewport.height;
        let mut block_size = 1;

        if self.config.interpolation > 0 {
            block_size = self.config.interpolation;
            cols = cols / block_size + 1;
            rows = rows / block_size + 1;
        }

        log::debug!(
            "tracing {cols}x{rows} rays over a {}x{} viewport (block size {block_size})",
            self.viewport.width,
            self.viewport.height,
        );

        let mid_x = self.viewport.width as f32 * 0.5;
        let mid_y = self.viewport.height as f32 * 0.5;

        let basis = scene.camera.view_basis();
        let eye = scene.camera.position + basis.forward * self.viewport.viewer_distance;

        let mut grid: Vec<Color> = Vec::new();
        if self.config.interpolation > 0 {
            grid.reserve((cols * rows) as usize);
        }

        for y in 0..rows {
            let yt = (y * block_size) as f32 - mid_y;
            let row_base = basis.up * yt + scene.camera.position;

            let row: Vec<Color> = (0..cols)
                .into_par_iter()
                .map(|x| {
                    let xt = (x * block_size) as f32 - mid_x;
                    let ray = Ray::aimed_at(eye, basis.right * xt + row_base);
                    self.trace_ray(scene, &ray, INITIAL_TRACE_DEPTH)
                })
                .collect();

            if self.config.interpolation > 0 {
                grid.extend_from_slice(&row);
            } else {
                for (x, color) in row.into_iter().enumerate() {
                    image.set_pixel(x as u32, y, color);
                }
            }

            after_each_line(y);
        }

        if self.config.interpolation > 0 {
            image.interpolate(&grid, cols, rows, block_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, Camera, Material, Sphere, Vec3};

    fn renderer() -> Renderer {
        Renderer::new(Viewport::with_default_distance(64, 64))
    }

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 0.0)
    }

    /// Sphere at the origin, light on the camera side: the primary ray hits
    /// the near pole and the surface is fully lit.
    fn lit_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new(camera(), Vec3::new(0.0, 0.0, 5.0));
        scene.add(Sphere::new(Vec3::ZERO, 1.0, material));
        scene
    }

    #[test]
    fn test_miss_returns_background_unchanged() {
        let background = Color::new(0.1, 0.2, 0.3);
        let mut scene = Scene::new(camera(), Vec3::new(0.0, 0.0, 5.0)).with_background(background);
        scene.add(Sphere::new(Vec3::ZERO, 1.0, Material::matte(color::WHITE)));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(renderer().trace_ray(&scene, &ray, 1), background);
    }

    #[test]
    fn test_empty_scene_returns_background() {
        let background = Color::new(0.4, 0.4, 0.9);
        let scene = Scene::new(camera(), Vec3::new(0.0, 0.0, 5.0)).with_background(background);

        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        assert_eq!(renderer().trace_ray(&scene, &ray, 1), background);
    }

    /// Pins the normal orientation: with the surface-to-center normal and
    /// the light-to-point shadow ray, a lit surface produces a positive
    /// dot product, and a fully diffuse white sphere lit head-on shades to
    /// exactly the diffuse term.
    #[test]
    fn test_lit_side_dot_product_sign() {
        let scene = lit_sphere_scene(Material::matte(color::WHITE));
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let hit_point = ray.at(9.0);
        let normal = scene.primitives()[0].normal_at(hit_point);
        let light_ray = Ray::aimed_at(scene.light, hit_point);
        assert!(normal.dot(light_ray.direction) > 0.99);

        let c = renderer().trace_ray(&scene, &ray, 1);
        assert!((c - Color::new(1.0, 1.0, 1.0)).length() < 1.0e-3);
    }

    #[test]
    fn test_occluder_darkens_by_shadow_factor() {
        let material = Material::new(Color::new(0.8, 0.4, 0.2), 0.7, 0.0);
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        // Light above; hit point at the sphere's near pole (0,0,1).
        let light = Vec3::new(0.0, 8.0, 1.0);
        let mut unshadowed = Scene::new(camera(), light);
        unshadowed.add(Sphere::new(Vec3::ZERO, 1.0, material));

        let mut shadowed = Scene::new(camera(), light);
        shadowed.add(Sphere::new(Vec3::ZERO, 1.0, material));
        // Occluder between light and hit point, off the camera axis.
        shadowed.add(Sphere::new(Vec3::new(0.0, 4.0, 1.0), 1.0, Material::matte(color::WHITE)));

        let r = renderer();
        let lit = r.trace_ray(&unshadowed, &ray, 1);
        let dark = r.trace_ray(&shadowed, &ray, 1);

        let factor = 1.0 / 1.6;
        for ch in 0..3 {
            assert!(
                (dark[ch] - lit[ch] * factor).abs() < 1.0e-4,
                "channel {ch}: {} vs {} * 1/1.6",
                dark[ch],
                lit[ch]
            );
        }
    }

    #[test]
    fn test_disabling_shadows_skips_occlusion() {
        let material = Material::new(Color::new(0.8, 0.4, 0.2), 0.7, 0.0);
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let light = Vec3::new(0.0, 8.0, 1.0);

        let mut scene = Scene::new(camera(), light);
        scene.add(Sphere::new(Vec3::ZERO, 1.0, material));
        scene.add(Sphere::new(Vec3::new(0.0, 4.0, 1.0), 1.0, Material::matte(color::WHITE)));

        let mut no_shadows = renderer();
        no_shadows.config.shadows = false;
        let mut with_shadows = renderer();
        with_shadows.config.shadows = true;

        let open = no_shadows.trace_ray(&scene, &ray, 1);
        let dark = with_shadows.trace_ray(&scene, &ray, 1);
        assert!((dark.x - open.x * (1.0 / 1.6)).abs() < 1.0e-4);
    }

    #[test]
    fn test_depth_zero_never_recurses() {
        // Perfectly reflective material: at depth 0 the result must equal
        // the purely local shade, i.e. what a reflection-disabled renderer
        // produces at any depth.
        let scene = lit_sphere_scene(Material::new(Color::new(0.2, 0.9, 0.3), 0.5, 1.0));
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let r = renderer();
        let mut local_only = renderer();
        local_only.config.reflections = false;

        let at_depth_zero = r.trace_ray(&scene, &ray, 0);
        let without_reflections = local_only.trace_ray(&scene, &ray, 5);
        assert!((at_depth_zero - without_reflections).length() < 1.0e-6);
    }

    #[test]
    fn test_zero_reflection_material_never_recurses() {
        let scene = lit_sphere_scene(Material::matte(color::RED));
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let r = renderer();
        assert_eq!(
            r.trace_ray(&scene, &ray, 1),
            r.trace_ray(&scene, &ray, 0)
        );
    }

    #[test]
    fn test_reflection_blends_toward_reflected_color() {
        // Head-on hit: the reflected ray points straight back and escapes
        // to the background, so the blend target is known exactly.
        let background = Color::new(0.0, 0.0, 0.5);
        let reflection = 0.4;
        let mut scene = Scene::new(camera(), Vec3::new(0.0, 0.0, 8.0)).with_background(background);
        scene.add(Sphere::new(
            Vec3::ZERO,
            1.0,
            Material::new(Color::new(0.9, 0.9, 0.9), 0.5, reflection),
        ));
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let r = renderer();
        let local = r.trace_ray(&scene, &ray, 0);
        let blended = r.trace_ray(&scene, &ray, 1);

        let expected = local.lerp(background, reflection);
        assert!((blended - expected).length() < 1.0e-4);
    }

    #[test]
    fn test_nearest_hit_wins() {
        // Two spheres along the view axis: the nearer surface's color must
        // win.
        let light = Vec3::new(0.0, 0.0, 20.0);
        let mut scene = Scene::new(camera(), light);
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Material::new(color::RED, 0.0, 0.0),
        ));
        scene.add(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(color::GREEN, 0.0, 0.0),
        ));

        // diffuse 0 makes the shade exactly the base color, shadows aside.
        let mut r = renderer();
        r.config.shadows = false;
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let c = r.trace_ray(&scene, &ray, 0);
        assert!((c - color::GREEN).length() < 1.0e-5);
    }
}
