//! Scene aggregation.

use crate::{color, Camera, Color, Primitive};
use glint_math::Vec3;

/// Everything one render call reads: a camera, a single point light, an
/// ordered primitive list, and the background color returned for rays that
/// hit nothing.
pub struct Scene {
    pub camera: Camera,
    /// Position of the point light.
    pub light: Vec3,
    pub background: Color,
    primitives: Vec<Box<dyn Primitive>>,
}

impl Scene {
    /// Create a scene with no primitives and a black background.
    pub fn new(camera: Camera, light: Vec3) -> Self {
        Self {
            camera,
            light,
            background: color::BLACK,
            primitives: Vec::new(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add a primitive. Insertion order is preserved; nearest-hit ties go
    /// to the earliest-added primitive.
    pub fn add<P: Primitive + 'static>(&mut self, primitive: P) {
        self.primitives.push(Box::new(primitive));
    }

    /// Add an already-boxed primitive.
    pub fn add_boxed(&mut self, primitive: Box<dyn Primitive>) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Box<dyn Primitive>] {
        &self.primitives
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
