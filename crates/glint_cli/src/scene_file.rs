//! JSON scene descriptions.
//!
//! A scene file supplies the camera, light, primitives, and optional image
//! and render settings. Colors are either an RGB triple or an `{"hsv":
//! [h, s, v]}` object.

use glint_math::Vec3;
use glint_renderer::{
    color, Camera, Color, Material, Plane, RenderConfig, Scene, Sphere, Viewport,
    DEFAULT_VIEWER_DISTANCE, EPSILON,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How far a plane normal's length may stray from 1.
const NORMAL_LENGTH_TOLERANCE: f32 = 1.0e-3;

#[derive(Debug, Error)]
pub enum SceneFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse scene JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("camera position and look-at point coincide")]
    DegenerateCamera,
    #[error("primitive {index}: sphere radius {radius} is not positive")]
    InvalidRadius { index: usize, radius: f32 },
    #[error("primitive {index}: plane normal has length {length}, expected 1")]
    NonUnitNormal { index: usize, length: f32 },
    #[error("interpolation factor {factor} does not divide the {width}x{height} image")]
    InterpolationMismatch {
        factor: u32,
        width: u32,
        height: u32,
    },
}

/// Fully resolved output of a scene file: everything a render run needs.
pub struct RenderSetup {
    pub scene: Scene,
    pub viewport: Viewport,
    pub config: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    pub camera: CameraDef,
    pub light: [f32; 3],
    #[serde(default)]
    pub background: Option<ColorDef>,
    #[serde(default)]
    pub image: ImageDef,
    #[serde(default)]
    pub render: RenderDef,
    pub primitives: Vec<PrimitiveDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDef {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    #[serde(default)]
    pub roll: f32,
}

/// A color as either `[r, g, b]` or `{"hsv": [h, s, v]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ColorDef {
    Rgb([f32; 3]),
    Hsv { hsv: [f32; 3] },
}

impl ColorDef {
    fn to_color(&self) -> Color {
        match *self {
            ColorDef::Rgb([r, g, b]) => Color::new(r, g, b),
            ColorDef::Hsv { hsv: [h, s, v] } => color::from_hsv(h, s, v),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageDef {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_viewer_distance")]
    pub viewer_distance: f32,
}

impl Default for ImageDef {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            viewer_distance: DEFAULT_VIEWER_DISTANCE,
        }
    }
}

fn default_viewer_distance() -> f32 {
    DEFAULT_VIEWER_DISTANCE
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderDef {
    #[serde(default)]
    pub interpolation: u32,
    #[serde(default = "default_true")]
    pub reflections: bool,
    #[serde(default = "default_true")]
    pub shadows: bool,
    #[serde(default = "default_shadow_factor")]
    pub shadow_factor: f32,
}

impl Default for RenderDef {
    fn default() -> Self {
        Self {
            interpolation: 0,
            reflections: true,
            shadows: true,
            shadow_factor: default_shadow_factor(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_shadow_factor() -> f32 {
    RenderConfig::default().shadow_factor
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDef {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: MaterialDef,
    },
    Plane {
        normal: [f32; 3],
        distance: f32,
        material: MaterialDef,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDef {
    pub color: ColorDef,
    #[serde(default = "default_diffuse")]
    pub diffuse: f32,
    #[serde(default)]
    pub reflection: f32,
}

fn default_diffuse() -> f32 {
    1.0
}

impl MaterialDef {
    fn to_material(&self) -> Material {
        Material::new(self.color.to_color(), self.diffuse, self.reflection)
    }
}

fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

impl SceneFile {
    /// Validate the description and build the scene, viewport, and render
    /// configuration.
    pub fn build(&self) -> Result<RenderSetup, SceneFileError> {
        let position = vec3(self.camera.position);
        let look_at = vec3(self.camera.look_at);
        if (position - look_at).length() < EPSILON {
            return Err(SceneFileError::DegenerateCamera);
        }

        let image = &self.image;
        let factor = self.render.interpolation;
        if factor > 0 && (image.width % factor != 0 || image.height % factor != 0) {
            return Err(SceneFileError::InterpolationMismatch {
                factor,
                width: image.width,
                height: image.height,
            });
        }

        let camera = Camera::new(position, look_at, self.camera.roll);
        let mut scene = Scene::new(camera, vec3(self.light));
        if let Some(background) = &self.background {
            scene = scene.with_background(background.to_color());
        }

        for (index, def) in self.primitives.iter().enumerate() {
            match *def {
                PrimitiveDef::Sphere {
                    center,
                    radius,
                    ref material,
                } => {
                    if radius <= 0.0 {
                        return Err(SceneFileError::InvalidRadius { index, radius });
                    }
                    scene.add(Sphere::new(vec3(center), radius, material.to_material()));
                }
                PrimitiveDef::Plane {
                    normal,
                    distance,
                    ref material,
                } => {
                    let n = vec3(normal);
                    let length = n.length();
                    if (length - 1.0).abs() > NORMAL_LENGTH_TOLERANCE {
                        return Err(SceneFileError::NonUnitNormal { index, length });
                    }
                    scene.add(Plane::new(n, distance, material.to_material()));
                }
            }
        }

        Ok(RenderSetup {
            scene,
            viewport: Viewport::new(image.width, image.height, image.viewer_distance),
            config: RenderConfig {
                interpolation: self.render.interpolation,
                reflections: self.render.reflections,
                shadows: self.render.shadows,
                shadow_factor: self.render.shadow_factor,
            },
        })
    }
}

/// Load and build a scene description from a JSON file.
pub fn load(path: &Path) -> Result<RenderSetup, SceneFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: SceneFile = serde_json::from_str(&text)?;
    file.build()
}
