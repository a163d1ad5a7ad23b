//! Glint renderer - CPU path tracing
//!
//! A Monte Carlo path tracer for physically-based rendering: spheres,
//! rectangles, triangles and meshes behind a BVH, textured diffuse, metal,
//! glass and emissive materials, light importance sampling, and a
//! bucket-parallel render loop.

mod bucket;
mod box_shape;
mod bvh;
mod camera;
mod error;
mod hittable;
mod material;
mod mesh;
mod pdf;
mod rect;
mod renderer;
mod sphere;
mod texture;
mod transform;
mod triangle;

pub use box_shape::BoxShape;
pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{BvhNode, BvhStats};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use mesh::{cube_mesh, sphere_mesh, MeshBuilder};
pub use pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
pub use rect::{AaRect, Plane};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, render_serial, ImageBuffer,
    RenderConfig, T_MAX, T_MIN,
};
pub use sphere::{MovingSphere, Sphere};
pub use texture::{CheckerSpace, CheckerTexture, ImageTexture, NoiseTexture, SolidColor, Texture};
pub use transform::{FlipFace, RotateY, Translate};
pub use triangle::Triangle;

/// Re-export common math types from glint_math
pub use glint_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
