//! Raster image assets for image-backed textures.
//!
//! Images are decoded once at scene-construction time into linear float
//! RGB. A missing or undecodable file is an error the caller is expected to
//! treat as fatal: an image texture cannot exist without its pixels.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glint_math::Color;
use thiserror::Error;

/// Errors that can occur while loading an image asset.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image {0} has no pixels")]
    Empty(String),
}

pub type AssetResult<T> = Result<T, AssetError>;

/// A decoded image.
///
/// Pixels are linear RGB in row-major order with row 0 at the top, the
/// way image files store them.
#[derive(Clone, Debug)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    path: String,
}

impl ImageData {
    /// Create an image from pixel data. `pixels.len()` must equal `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>, path: impl Into<String>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height) as usize);
        Self {
            width,
            height,
            pixels,
            path: path.into(),
        }
    }

    /// Decode an image file from disk.
    pub fn open(path: impl AsRef<Path>) -> AssetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let img = image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Empty(path.display().to_string()));
        }

        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    srgb_to_linear(p[0]),
                    srgb_to_linear(p[1]),
                    srgb_to_linear(p[2]),
                )
            })
            .collect();

        Ok(Self::new(width, height, pixels, path.to_string_lossy()))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at integer coordinates, `(0, 0)` top-left. Out-of-range
    /// coordinates are clamped to the border.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if self.is_empty() {
            return Color::ZERO;
        }
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width + x) as usize]
    }

    /// Nearest-pixel lookup at texture coordinates.
    ///
    /// `u` and `v` are clamped to `[0, 1]`. `v` runs bottom-up while image
    /// rows run top-down, so `v` is flipped before indexing.
    pub fn sample_nearest(&self, u: f32, v: f32) -> Color {
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let x = (u * self.width as f32) as u32;
        let y = (v * self.height as f32) as u32;
        self.pixel(x, y)
    }

    /// Approximate memory footprint of the pixel data.
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Color>()
    }
}

/// Cache of decoded images keyed by the path they were requested with.
///
/// Scenes that put the same asset on several objects decode it once.
pub struct ImageCache {
    images: HashMap<String, Arc<ImageData>>,
    base_dir: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a cache that resolves relative paths against `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            images: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load an image, using the cached copy if there is one.
    pub fn load(&mut self, path: &str) -> AssetResult<Arc<ImageData>> {
        if let Some(image) = self.images.get(path) {
            return Ok(image.clone());
        }

        let full_path = self.resolve_path(path);
        let image = Arc::new(ImageData::open(&full_path)?);
        self.images.insert(path.to_string(), image.clone());

        log::debug!(
            "Loaded image: {} ({}x{}, {:.1} KB)",
            path,
            image.width(),
            image.height(),
            image.size_bytes() as f32 / 1024.0
        );

        Ok(image)
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.images.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);

        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an 8-bit sRGB value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
