//! Sphere primitive.

use crate::{primitive::NO_HIT, Color, Material, Primitive};
use glint_math::{Ray, Vec3};

/// A sphere described by its center and radius.
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Primitive for Sphere {
    fn intersect(&self, ray: &Ray) -> f32 {
        let v = ray.origin - self.center;
        let b = 2.0 * ray.direction.dot(v);
        let c = v.dot(v) - self.radius * self.radius;
        let d = b * b - 4.0 * c;

        // Near root only; leaving the sphere from inside is not modeled.
        if d >= 0.0 {
            let t = (-b - d.sqrt()) * 0.5;
            if t > 0.0 {
                return t;
            }
        }

        NO_HIT
    }

    /// Points from the surface toward the center. The shading and shadow
    /// math is written against this orientation; see the dot-product sign
    /// test in the renderer.
    fn normal_at(&self, point: Vec3) -> Vec3 {
        (self.center - point) / self.radius
    }

    fn color_at(&self, _point: Vec3, _normal: Vec3) -> Color {
        // TODO: texture mapping
        self.material.color
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Material::matte(color::WHITE))
    }

    #[test]
    fn test_axial_hit_distance() {
        let sphere = Sphere::new(Vec3::ZERO, 2.5, Material::matte(color::WHITE));
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);

        let t = sphere.intersect(&ray);
        assert!((t - 7.5).abs() < 1.0e-4, "expected 10 - r, got {t}");
    }

    #[test]
    fn test_normal_is_unit_length_and_inward() {
        let sphere = unit_sphere();
        let ray = Ray::aimed_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let hit_point = ray.at(sphere.intersect(&ray));

        let normal = sphere.normal_at(hit_point);
        assert!((normal.length() - 1.0).abs() < 1.0e-4);
        // Orientation pin: surface-to-center, not center-to-surface.
        assert!((normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1.0e-4);
    }

    #[test]
    fn test_miss_returns_sentinel() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(1.0, 0.0, 0.0));

        assert_eq!(sphere.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_sphere_behind_ray_is_a_miss() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));

        assert_eq!(sphere.intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_color_at_is_material_color() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Material::matte(color::CYAN));
        let c = sphere.color_at(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(c, color::CYAN);
    }
}
