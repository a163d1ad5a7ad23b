//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with configurable depth
//! - Light sampling mixed with the material's cosine lobe
//! - Gamma correction and coverage-based alpha
//! - Anti-aliasing via multi-sampling
//! - Bucket-parallel rendering on a rayon pool

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::error::{RenderError, RenderResult};
use crate::pdf::{CosinePdf, HittablePdf, MixturePdf, Pdf};
use crate::{Camera, HitRecord, Hittable};
use glint_math::sampling::gen_f32;
use glint_math::{Color, Interval, Ray};
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;

/// Closest hit distance accepted, to avoid self-intersection acne.
pub const T_MIN: f32 = 0.001;
/// Farthest hit distance considered.
pub const T_MAX: f32 = 10_000.0;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels; the height follows the camera aspect ratio
    pub image_width: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Base seed; each bucket derives its own generator from it
    pub seed: u64,
    /// Worker threads. `None` uses rayon's global pool
    pub threads: Option<usize>,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Write coverage into the alpha channel instead of opaque 255
    pub transparent_background: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            samples_per_pixel: 12,
            max_depth: 50,
            background: Color::ZERO,
            seed: 99,
            threads: None,
            bucket_size: DEFAULT_BUCKET_SIZE,
            transparent_background: false,
        }
    }
}

impl RenderConfig {
    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image width must be positive".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples per pixel must be positive".into(),
            ));
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidConfig("max depth must be positive".into()));
        }
        if self.bucket_size == 0 {
            return Err(RenderError::InvalidConfig("bucket size must be positive".into()));
        }
        if self.threads == Some(0) {
            return Err(RenderError::InvalidConfig("thread count must be positive".into()));
        }
        Ok(())
    }

    /// Image height for a camera aspect ratio, never less than one row.
    pub fn image_height(&self, aspect_ratio: f32) -> u32 {
        let height = (self.image_width as f32 / aspect_ratio) as u32;
        if height < 1 {
            log::warn!(
                "Image height for width {} at aspect {} rounds to zero, using 1",
                self.image_width,
                aspect_ratio
            );
            1
        } else {
            height
        }
    }
}

/// Compute the color seen by a ray.
///
/// Traces the ray through the scene, bouncing off surfaces and
/// accumulating emitted light. `lights` is the set of emitters to sample
/// directly; with `None` only the materials' own lobes are followed.
pub fn ray_color(
    ray: &Ray,
    background: Color,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let mut rec = HitRecord::default();
    if !world.hit(ray, Interval::new(T_MIN, T_MAX), &mut rec) {
        return background;
    }

    shade(ray, &rec, background, world, lights, depth, rng)
}

/// Radiance leaving a surface hit back along `ray`.
fn shade(
    ray: &Ray,
    rec: &HitRecord,
    background: Color,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    // Lights only emit from their front side
    let emitted = if rec.front_face {
        rec.material.emitted(rec.u, rec.v, rec.p)
    } else {
        Color::ZERO
    };

    let Some(scatter) = rec.material.scatter(ray, rec, rng) else {
        return emitted;
    };

    let (scattered, attenuation) = match (scatter.pdf, lights) {
        (Some(_), Some(lights)) => {
            let light_pdf = HittablePdf::new(lights, rec.p);
            let cosine_pdf = CosinePdf::new(rec.normal);
            let mixture = MixturePdf::new(&light_pdf, &cosine_pdf);

            let scattered = Ray::from_direction(rec.p, mixture.generate(rng), ray.time());
            let pdf = mixture.value(scattered.direction());
            if !(pdf > 0.0) {
                return emitted;
            }

            let weight = rec.material.scattering_pdf(ray, rec, &scattered) / pdf;
            (scattered, scatter.attenuation * weight)
        }
        _ => (scatter.scattered, scatter.attenuation),
    };

    emitted + attenuation * ray_color(&scattered, background, world, lights, depth - 1, rng)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGBA with the given alpha.
pub fn color_to_rgba(color: Color, alpha: u8) -> [u8; 4] {
    let quantize = |c: f32| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), alpha]
}

/// Render a single pixel with multi-sampling.
///
/// Row `y = 0` is the top of the image. Returns the averaged linear color
/// and the fraction of primary rays that hit geometry.
#[allow(clippy::too_many_arguments)]
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    x: u32,
    y: u32,
    image_width: u32,
    image_height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> (Color, f32) {
    let samples = config.samples_per_pixel.max(1);
    let s_scale = image_width.saturating_sub(1).max(1) as f32;
    let t_scale = image_height.saturating_sub(1).max(1) as f32;
    let row = image_height.saturating_sub(1).saturating_sub(y) as f32;

    let mut pixel_color = Color::ZERO;
    let mut hits = 0u32;

    for _ in 0..samples {
        let s = (x as f32 + gen_f32(rng)) / s_scale;
        let t = (row + gen_f32(rng)) / t_scale;
        let ray = camera.get_ray(s, t, rng);

        // The primary hit feeds both coverage and shading
        let mut rec = HitRecord::default();
        let hit = world.hit(&ray, Interval::new(T_MIN, T_MAX), &mut rec);
        if hit {
            hits += 1;
        }
        if config.max_depth == 0 {
            continue;
        }

        pixel_color += if hit {
            shade(&ray, &rec, config.background, world, lights, config.max_depth, rng)
        } else {
            config.background
        };
    }

    (
        pixel_color / samples as f32,
        hits as f32 / samples as f32,
    )
}

/// Row-major offset of (x, y), computed in `usize` so large images
/// do not wrap.
fn pixel_offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

/// Image buffer for storing render output.
///
/// Holds averaged linear color plus the per-pixel hit coverage used for
/// alpha.
#[derive(Debug, Clone)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
    pub coverage: Vec<f32>,
    /// Use coverage as alpha when converting to RGBA
    pub transparent: bool,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32, transparent: bool) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; count],
            coverage: vec![0.0; count],
            transparent,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        pixel_offset(self.width, x, y)
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let index = self.index(x, y);
        self.pixels[index] = color;
        self.coverage[index] = coverage;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let local = local_y as usize * bucket.width as usize + local_x as usize;
                self.set(
                    bucket.x + local_x,
                    bucket.y + local_y,
                    result.pixels[local],
                    result.coverage[local],
                );
            }
        }
    }

    fn alpha(&self, index: usize) -> u8 {
        if self.transparent {
            (255.0 * self.coverage[index].clamp(0.0, 1.0)).round() as u8
        } else {
            255
        }
    }

    /// RGBA of the pixel at (x, y).
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let index = self.index(x, y);
        color_to_rgba(self.pixels[index], self.alpha(index))
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for (index, color) in self.pixels.iter().enumerate() {
            bytes.extend_from_slice(&color_to_rgba(*color, self.alpha(index)));
        }
        bytes
    }

    /// Convert to an `image` crate buffer.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| image::Rgba(self.rgba(x, y)))
    }

    /// Encode to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

fn prepare(camera: &Camera, config: &RenderConfig) -> RenderResult<(u32, u32)> {
    config.validate()?;

    let aspect = camera.aspect_ratio();
    if !(aspect.is_finite() && aspect > 0.0) {
        return Err(RenderError::InvalidConfig(format!(
            "camera aspect ratio must be positive, got {aspect}"
        )));
    }

    let (width, height) = (config.image_width, config.image_height(aspect));
    if (width as usize).checked_mul(height as usize).is_none() {
        return Err(RenderError::InvalidConfig(format!(
            "{width}x{height} image is too large to address"
        )));
    }
    Ok((width, height))
}

fn assemble(width: u32, height: u32, config: &RenderConfig, results: &[BucketResult]) -> ImageBuffer {
    let mut image = ImageBuffer::new(width, height, config.transparent_background);
    for result in results {
        image.write_bucket(result);
    }
    image
}

/// Render the entire scene on a rayon pool, one task per bucket.
///
/// Output depends only on `config.seed`, never on scheduling, so this
/// produces the same image as [`render_serial`].
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let (width, height) = prepare(camera, config)?;
    let buckets = generate_buckets(width, height, config.bucket_size);

    let pool = match config.threads {
        Some(threads) => Some(rayon::ThreadPoolBuilder::new().num_threads(threads).build()?),
        None => None,
    };
    let threads = pool
        .as_ref()
        .map_or_else(rayon::current_num_threads, |p| p.current_num_threads());

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {} buckets on {} threads",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth,
        buckets.len(),
        threads
    );
    let start = Instant::now();

    let render_all = || -> Vec<BucketResult> {
        buckets
            .par_iter()
            .map(|bucket| render_bucket(bucket, camera, world, lights, width, height, config))
            .collect()
    };
    let results = match &pool {
        Some(pool) => pool.install(render_all),
        None => render_all(),
    };

    let image = assemble(width, height, config, &results);
    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render the entire scene on the calling thread.
pub fn render_serial(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
) -> RenderResult<ImageBuffer> {
    let (width, height) = prepare(camera, config)?;
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} at {} spp, depth {} (single thread)",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .iter()
        .map(|bucket| render_bucket(bucket, camera, world, lights, width, height, config))
        .collect();

    let image = assemble(width, height, config, &results);
    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaRect, BoxShape, DiffuseLight, FlipFace, HittableList, Lambertian, Material, Sphere};
    use glint_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn diffuse(color: Color) -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(color))
    }

    fn emitter(strength: f32) -> Arc<dyn Material> {
        Arc::new(DiffuseLight::from_color(Color::splat(strength)))
    }

    /// Red and green spheres on a floor under a square light.
    fn two_spheres_scene() -> (Camera, HittableList, AaRect) {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Point3::new(0.0, -1000.0, 0.0),
            1000.0,
            diffuse(Color::splat(0.5)),
        )));
        world.add(Box::new(Sphere::new(
            Point3::new(-1.0, 1.0, 0.0),
            1.0,
            diffuse(Color::new(0.8, 0.1, 0.1)),
        )));
        world.add(Box::new(Sphere::new(
            Point3::new(1.0, 1.0, 0.0),
            1.0,
            diffuse(Color::new(0.1, 0.8, 0.1)),
        )));
        world.add(Box::new(AaRect::xz(-1.0, 1.0, -1.0, 1.0, 4.0, emitter(8.0))));

        let lights = AaRect::xz(-1.0, 1.0, -1.0, 1.0, 4.0, emitter(8.0));

        let camera = Camera::new()
            .with_position(Point3::new(0.0, 1.0, 3.0), Point3::new(0.0, 1.0, 0.0), Vec3::Y)
            .with_lens(60.0, 0.0, 3.0)
            .with_aspect_ratio(1.5);

        (camera, world, lights)
    }

    fn small_config() -> RenderConfig {
        RenderConfig {
            image_width: 24,
            samples_per_pixel: 8,
            max_depth: 8,
            background: Color::ZERO,
            seed: 7,
            threads: Some(2),
            bucket_size: 8,
            transparent_background: true,
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(4.0, -1.0, 0.25), 255), [255, 0, 127, 255]);
        assert_eq!(color_to_rgba(Color::ONE, 0)[3], 0);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let zero_width = RenderConfig {
            image_width: 0,
            ..Default::default()
        };
        assert!(matches!(zero_width.validate(), Err(RenderError::InvalidConfig(_))));

        let zero_samples = RenderConfig {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert!(zero_samples.validate().is_err());

        let zero_depth = RenderConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert!(zero_depth.validate().is_err());
    }

    #[test]
    fn test_image_height_never_zero() {
        let config = RenderConfig {
            image_width: 2,
            ..Default::default()
        };
        assert_eq!(config.image_height(16.0 / 9.0), 1);
        assert_eq!(config.image_height(100.0), 1);

        let config = RenderConfig {
            image_width: 400,
            ..Default::default()
        };
        assert_eq!(config.image_height(16.0 / 9.0), 225);
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "samples_per_pixel": 64, "background": [0.5, 0.7, 1.0] }"#)
                .unwrap();
        assert_eq!(config.samples_per_pixel, 64);
        assert_eq!(config.background, Color::new(0.5, 0.7, 1.0));
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = HittableList::new();
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ray_color(&ray, Color::ONE, &world, None, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let world = HittableList::new();
        let ray = Ray::new(Point3::ORIGIN, Vec3::Z, 0.0);
        let background = Color::new(0.7, 0.8, 1.0);
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(ray_color(&ray, background, &world, None, 5, &mut rng), background);
    }

    #[test]
    fn test_light_emits_from_front_only() {
        let mut world = HittableList::new();
        world.add(Box::new(AaRect::xz(-1.0, 1.0, -1.0, 1.0, 4.0, emitter(15.0))));
        let background = Color::splat(0.5);
        let mut rng = StdRng::seed_from_u64(3);

        // From below the ray meets the back of the light
        let up = Ray::new(Point3::ORIGIN, Vec3::Y, 0.0);
        assert_eq!(ray_color(&up, background, &world, None, 5, &mut rng), Color::ZERO);

        let down = Ray::new(Point3::new(0.0, 8.0, 0.0), -Vec3::Y, 0.0);
        assert_eq!(ray_color(&down, background, &world, None, 5, &mut rng), Color::splat(15.0));

        // Flipping the face turns the underside into the emitting side
        let mut flipped = HittableList::new();
        flipped.add(Box::new(FlipFace::new(Box::new(AaRect::xz(
            -1.0,
            1.0,
            -1.0,
            1.0,
            4.0,
            emitter(15.0),
        )))));
        assert_eq!(ray_color(&up, background, &flipped, None, 5, &mut rng), Color::splat(15.0));
    }

    /// Closed gray room spanning the unit cube.
    fn closed_room() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(BoxShape::new(
            Point3::ORIGIN,
            Point3::splat(1.0),
            diffuse(Color::splat(0.5)),
        )));
        world
    }

    /// Mean radiance along a fixed ray inside the room, averaged in f64.
    fn mean_radiance(world: &HittableList, lights: Option<&dyn Hittable>, seed: u64) -> f64 {
        let ray = Ray::new(Point3::new(0.5, 0.3, 0.9), -Vec3::Z, 0.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = 200_000;
        let sum: f64 = (0..samples)
            .map(|_| {
                let color = ray_color(&ray, Color::ZERO, world, lights, 6, &mut rng);
                (color.x + color.y + color.z) as f64 / 3.0
            })
            .sum();
        sum / samples as f64
    }

    #[test]
    fn test_rect_light_sampling_keeps_mean() {
        let mut world = closed_room();
        world.add(Box::new(FlipFace::new(Box::new(AaRect::xz(
            0.2,
            0.8,
            0.2,
            0.8,
            0.999,
            emitter(4.0),
        )))));
        let lights = AaRect::xz(0.2, 0.8, 0.2, 0.8, 0.999, emitter(4.0));

        let plain = mean_radiance(&world, None, 21);
        let sampled = mean_radiance(&world, Some(&lights), 22);
        assert!(plain > 0.0);
        assert!(((sampled - plain) / plain).abs() < 0.05, "{sampled} vs {plain}");
    }

    #[test]
    fn test_sphere_light_sampling_keeps_mean() {
        let mut world = closed_room();
        let center = Point3::new(0.5, 0.75, 0.5);
        world.add(Box::new(Sphere::new(center, 0.15, emitter(4.0))));
        let lights = Sphere::new(center, 0.15, emitter(4.0));

        let plain = mean_radiance(&world, None, 23);
        let sampled = mean_radiance(&world, Some(&lights), 24);
        assert!(plain > 0.0);
        assert!(((sampled - plain) / plain).abs() < 0.05, "{sampled} vs {plain}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let (camera, world, lights) = two_spheres_scene();
        let config = small_config();

        let first = render(&camera, &world, Some(&lights), &config).unwrap();
        let second = render(&camera, &world, Some(&lights), &config).unwrap();

        assert_eq!((first.width, first.height), (24, 16));
        assert_eq!(first.pixels, second.pixels);
        assert_eq!(first.to_rgba(), second.to_rgba());
        assert!(first.pixels.iter().all(|c| c.is_finite()));

        // Upper-left looks past everything into the background
        assert_eq!(first.rgba(0, 0)[3], 0);
        // Bottom-center looks down at the floor
        assert_eq!(first.rgba(12, 15)[3], 255);
    }

    #[test]
    fn test_opaque_output_ignores_coverage() {
        let (camera, world, lights) = two_spheres_scene();
        let config = RenderConfig {
            transparent_background: false,
            samples_per_pixel: 2,
            ..small_config()
        };

        let image = render(&camera, &world, Some(&lights), &config).unwrap();
        assert_eq!(image.coverage[0], 0.0);
        assert_eq!(image.rgba(0, 0)[3], 255);
        assert_eq!(image.to_image().dimensions(), (24, 16));
    }

    #[test]
    fn test_pixel_offset_does_not_wrap() {
        assert_eq!(pixel_offset(24, 3, 2), 51);

        // 65536 * 65536 is one past u32::MAX
        #[cfg(target_pointer_width = "64")]
        assert_eq!(pixel_offset(65_536, 5, 65_536), 4_294_967_301);

        let mut image = ImageBuffer::new(70_000, 2, true);
        assert_eq!(image.pixels.len(), 140_000);
        image.set(69_999, 1, Color::ONE, 1.0);
        assert_eq!(image.pixels[139_999], Color::ONE);
        assert_eq!(image.rgba(69_999, 1), [255, 255, 255, 255]);
    }

    #[test]
    fn test_parallel_matches_serial() {
        let (camera, world, lights) = two_spheres_scene();
        let config = small_config();

        let parallel = render(&camera, &world, Some(&lights), &config).unwrap();
        let serial = render_serial(&camera, &world, Some(&lights), &config).unwrap();

        assert_eq!(parallel.pixels, serial.pixels);
        assert_eq!(parallel.coverage, serial.coverage);
    }

    #[test]
    fn test_render_rejects_bad_config() {
        let (camera, world, _) = two_spheres_scene();
        let config = RenderConfig {
            samples_per_pixel: 0,
            ..small_config()
        };
        assert!(matches!(
            render(&camera, &world, None, &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_variance_falls_with_sample_count() {
        // Closed diffuse room lit from the ceiling
        let mut world = HittableList::new();
        world.add(Box::new(BoxShape::new(
            Point3::ORIGIN,
            Point3::splat(1.0),
            diffuse(Color::splat(0.5)),
        )));
        world.add(Box::new(FlipFace::new(Box::new(AaRect::xz(
            0.35,
            0.65,
            0.35,
            0.65,
            0.999,
            emitter(4.0),
        )))));
        let lights = AaRect::xz(0.35, 0.65, 0.35, 0.65, 0.999, emitter(4.0));

        let camera = Camera::new()
            .with_position(Point3::new(0.5, 0.5, 0.9), Point3::new(0.5, 0.5, 0.0), Vec3::Y)
            .with_lens(40.0, 0.0, 1.0)
            .with_aspect_ratio(1.0);

        let variance = |samples: u32, seed: u64| -> f64 {
            let config = RenderConfig {
                samples_per_pixel: samples,
                max_depth: 10,
                ..Default::default()
            };
            let mut rng = StdRng::seed_from_u64(seed);
            let repeats = 200;
            let values: Vec<f64> = (0..repeats)
                .map(|_| {
                    let (color, _) = render_pixel(
                        &camera,
                        &world,
                        Some(&lights),
                        0,
                        0,
                        1,
                        1,
                        &config,
                        &mut rng,
                    );
                    color.x as f64
                })
                .collect();
            let mean = values.iter().sum::<f64>() / repeats as f64;
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (repeats - 1) as f64
        };

        let coarse = variance(4, 11);
        let fine = variance(64, 12);
        assert!(fine > 0.0);

        // 16x the samples should give roughly 1/16 the variance
        let ratio = coarse / fine;
        assert!((8.0..32.0).contains(&ratio), "variance ratio = {ratio}");
    }
}
