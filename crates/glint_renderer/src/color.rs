//! Color helpers.
//!
//! Colors are glam vectors with r, g, b carried in x, y, z, nominally in
//! [0,1]. Nothing here clamps; quantization and clamping happen at the
//! framebuffer boundary.

use glint_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
pub const RED: Color = Color::new(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

/// Per-channel increment that carries `from` to `to` in `steps` equal
/// steps, for incremental linear interpolation across a scanline or down a
/// block edge.
#[inline]
pub fn lerp_step(from: Color, to: Color, steps: u32) -> Color {
    (to - from) / steps as f32
}

/// Convert an HSV triple, each component in [0,1], to an RGB color.
pub fn from_hsv(h: f32, s: f32, v: f32) -> Color {
    if s == 0.0 {
        return Color::splat(v);
    }

    let h6 = h * 6.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (i as i32).rem_euclid(6) {
        0 => Color::new(v, t, p),
        1 => Color::new(q, v, p),
        2 => Color::new(p, v, t),
        3 => Color::new(p, q, v),
        4 => Color::new(t, p, v),
        _ => Color::new(v, p, q),
    }
}
