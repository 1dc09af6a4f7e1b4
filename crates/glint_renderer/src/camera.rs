//! Camera and viewport for ray generation.

use glint_math::Vec3;
use std::f32::consts::PI;

/// Focal distance used when none is given.
pub const DEFAULT_VIEWER_DISTANCE: f32 = 400.0;

/// View basis derived from a [`Camera`], consumed by the renderer.
///
/// `forward` is unit length; `right` and `up` are orthogonal to it and to
/// each other but inherit the roll-derived view-up vector's magnitude.
#[derive(Debug, Clone, Copy)]
pub struct ViewBasis {
    /// N: from the look-at point toward the viewer.
    pub forward: Vec3,
    /// U: screen-space x axis.
    pub right: Vec3,
    /// V: screen-space y axis.
    pub up: Vec3,
}

/// Camera at `position`, aimed at `look_at`, rolled by `roll` radians.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub look_at: Vec3,
    pub roll: f32,
}

impl Camera {
    pub fn new(position: Vec3, look_at: Vec3, roll: f32) -> Self {
        Self {
            position,
            look_at,
            roll,
        }
    }

    /// View-up vector derived from the roll angle; always lies in the XY
    /// plane, with magnitude sqrt(2).
    fn view_up(&self) -> Vec3 {
        let a = PI - self.roll;
        let xt = a.cos();
        let yt = a.sin();
        Vec3::new(xt + yt, xt - yt, 0.0)
    }

    /// Derive the view basis from the current position, look-at point, and
    /// roll. Computed fresh on every call so field edits always take
    /// effect; the renderer calls this once per render.
    ///
    /// `position` must differ from `look_at` (the forward vector is
    /// normalized).
    pub fn view_basis(&self) -> ViewBasis {
        let vup = self.view_up();
        let forward = (self.position - self.look_at).normalize();
        let right = forward.cross(vup);
        let up = forward.cross(right);
        ViewBasis { forward, right, up }
    }
}

/// Viewport geometry: image dimensions in pixels plus the focal distance
/// from the eye to the image plane along the forward axis.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub viewer_distance: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, viewer_distance: f32) -> Self {
        Self {
            width,
            height,
            viewer_distance,
        }
    }

    /// Viewport covering `width` x `height` at the default focal distance.
    pub fn with_default_distance(width: u32, height: u32) -> Self {
        Self::new(width, height, DEFAULT_VIEWER_DISTANCE)
    }
}
