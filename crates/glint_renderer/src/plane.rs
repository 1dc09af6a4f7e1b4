//! Infinite plane primitive.

use crate::{primitive::NO_HIT, Color, Material, Primitive};
use glint_math::{is_zero, Ray, Vec3};

/// An infinite plane in Hessian normal form: the set of points p with
/// normal . p + distance = 0.
pub struct Plane {
    normal: Vec3,
    distance: f32,
    material: Material,
}

impl Plane {
    /// Create a new plane. `normal` must be unit length.
    pub fn new(normal: Vec3, distance: f32, material: Material) -> Self {
        Self {
            normal,
            distance,
            material,
        }
    }
}

impl Primitive for Plane {
    fn intersect(&self, ray: &Ray) -> f32 {
        let v1 = self.normal.dot(ray.direction);

        // A ray running parallel to the plane never hits.
        if is_zero(v1) {
            return NO_HIT;
        }

        let k = (-self.distance - self.normal.dot(ray.origin)) / v1;
        if k > 0.0 {
            k
        } else {
            NO_HIT
        }
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
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

    fn ground() -> Plane {
        // The XZ plane: normal (0,1,0), distance 0.
        Plane::new(Vec3::new(0.0, 1.0, 0.0), 0.0, Material::matte(color::GREEN))
    }

    #[test]
    fn test_straight_down_hit_distance() {
        let ray = Ray::aimed_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        let t = ground().intersect(&ray);
        assert!((t - 5.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(ground().intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_plane_behind_ray_is_a_miss() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ground().intersect(&ray), NO_HIT);
    }

    #[test]
    fn test_offset_plane() {
        // normal (0,1,0), distance -2 puts the plane at y = 2.
        let plane = Plane::new(Vec3::new(0.0, 1.0, 0.0), -2.0, Material::matte(color::GREEN));
        let ray = Ray::aimed_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        let t = plane.intersect(&ray);
        assert!((t - 3.0).abs() < 1.0e-5);
    }

    #[test]
    fn test_normal_at_returns_stored_normal() {
        let plane = ground();
        let n = plane.normal_at(Vec3::new(42.0, 0.0, -7.0));
        assert_eq!(n, Vec3::new(0.0, 1.0, 0.0));
    }
}
