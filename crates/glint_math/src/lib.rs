//! Glint math - the small geometric toolkit the path tracer is built on.
//!
//! Vectors come straight from glam. On top of that this crate adds a
//! distinct `Point3` type for positions, rays with a time stamp for motion
//! blur, axis-aligned bounding boxes, orthonormal bases, and the random
//! sampling routines used by materials, lights and the camera.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod onb;
mod perlin;
mod point;
mod ray;
pub mod sampling;
mod transform;

pub use aabb::{Aabb, AabbBuilder};
pub use interval::Interval;
pub use onb::Onb;
pub use perlin::Perlin;
pub use point::Point3;
pub use ray::Ray;
pub use transform::AabbTransform;

/// Linear RGB color.
pub type Color = Vec3;
