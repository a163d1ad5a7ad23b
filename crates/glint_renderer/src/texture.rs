//! Textures: spatially varying colors looked up by materials.

use glint_core::{AssetError, ImageData};
use glint_math::{Color, Perlin, Point3};
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Color as a function of surface coordinates `(u, v)` and hit point `p`.
pub trait Texture: Send + Sync {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Point3) -> Color {
        self.color
    }
}

/// Which coordinates a checker pattern is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerSpace {
    /// Squares in texture space, following the surface parametrization.
    Uv,
    /// Cubes in world space, as if carved from a solid block.
    Solid,
}

/// Alternating two-color checker pattern.
#[derive(Debug, Clone, Copy)]
pub struct CheckerTexture {
    scale: f32,
    odd: Color,
    even: Color,
    space: CheckerSpace,
}

impl CheckerTexture {
    /// `scale` is the number of cells per unit of the chosen coordinates.
    pub fn new(scale: f32, odd: Color, even: Color, space: CheckerSpace) -> Self {
        Self {
            scale,
            odd,
            even,
            space,
        }
    }

    pub fn uv(scale: f32, odd: Color, even: Color) -> Self {
        Self::new(scale, odd, even, CheckerSpace::Uv)
    }

    pub fn solid(scale: f32, odd: Color, even: Color) -> Self {
        Self::new(scale, odd, even, CheckerSpace::Solid)
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f32, v: f32, p: Point3) -> Color {
        let cell = |x: f32| (x * self.scale).floor() as i64;
        let sum = match self.space {
            CheckerSpace::Uv => cell(u) + cell(v),
            CheckerSpace::Solid => cell(p.x) + cell(p.y) + cell(p.z),
        };

        if sum.rem_euclid(2) == 1 {
            self.odd
        } else {
            self.even
        }
    }
}

/// Marble-like gray pattern from Perlin turbulence.
pub struct NoiseTexture {
    perlin: Perlin,
    scale: f32,
}

impl NoiseTexture {
    const TURBULENCE_DEPTH: usize = 7;

    pub fn new(scale: f32, rng: &mut dyn RngCore) -> Self {
        Self {
            perlin: Perlin::new(rng),
            scale,
        }
    }
}

impl Texture for NoiseTexture {
    fn value(&self, _u: f32, _v: f32, p: Point3) -> Color {
        let scaled = Point3::from_vec(p.to_vec() * self.scale);
        Color::splat(self.perlin.turbulence(scaled, Self::TURBULENCE_DEPTH))
    }
}

/// Texture backed by a decoded image, sampled with nearest-pixel lookup.
pub struct ImageTexture {
    image: Arc<ImageData>,
}

impl ImageTexture {
    /// Debug color returned when the image has no pixels.
    pub const MISSING: Color = Color::new(0.0, 1.0, 1.0);

    pub fn new(image: Arc<ImageData>) -> Self {
        Self { image }
    }

    /// Load and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let image = ImageData::open(path)?;
        log::debug!(
            "Loaded texture {} ({}x{})",
            image.path(),
            image.width(),
            image.height()
        );
        Ok(Self::new(Arc::new(image)))
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f32, v: f32, _p: Point3) -> Color {
        if self.image.is_empty() {
            return Self::MISSING;
        }
        self.image.sample_nearest(u, v)
    }
}
