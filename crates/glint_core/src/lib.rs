//! Glint Core - assets shared by the renderer and scene setup code.
//!
//! This crate provides:
//!
//! - **Image assets**: decoding raster files into linear RGB and caching
//!   them by path, for image-backed textures.
//!
//! # Example
//!
//! ```ignore
//! use glint_core::ImageCache;
//!
//! let mut cache = ImageCache::with_base_dir("assets");
//! let earth = cache.load("earthmap.jpg")?;
//! println!("{}x{}", earth.width(), earth.height());
//! ```

pub mod image;

pub use crate::image::{AssetError, AssetResult, ImageCache, ImageData};
