use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays represent a line starting at `origin` and traveling in `direction`.
/// Rays built with [`Ray::aimed_at`] carry a unit direction and remember how
/// far away the point they were aimed at is, which the renderer uses for
/// light-occlusion distance tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Distance from `origin` to the point this ray was aimed at.
    /// Only meaningful for rays built with [`Ray::aimed_at`]; zero otherwise.
    pub target_distance: f32,
}

impl Ray {
    /// Create a new ray from an origin and a direction.
    ///
    /// The direction is taken as-is; no normalization is performed.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            target_distance: 0.0,
        }
    }

    /// Create a ray at `origin` aimed at `target`.
    ///
    /// The direction is normalized and the origin-to-target distance is
    /// recorded in `target_distance`. `target` must not coincide with
    /// `origin` (the direction would be a zero vector and normalization
    /// divides by its magnitude).
    #[inline]
    pub fn aimed_at(origin: Vec3, target: Vec3) -> Self {
        let offset = target - origin;
        let distance = offset.length();
        Self {
            origin,
            direction: offset / distance,
            target_distance: distance,
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
