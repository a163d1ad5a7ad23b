//! Error types for rendering.

use glint_core::AssetError;
use thiserror::Error;

/// Errors that can occur while setting up or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub type RenderResult<T> = Result<T, RenderError>;
