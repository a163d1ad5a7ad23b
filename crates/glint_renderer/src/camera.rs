//! Camera for ray generation.

use glint_math::sampling::{gen_range, random_in_unit_disk};
use glint_math::{Onb, Point3, Ray, Vec3};
use rand::RngCore;

/// Thin-lens perspective camera with a shutter interval.
///
/// Configured through the `with_*` builder methods; each one recomputes the
/// derived viewport, so a camera is always ready to generate rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f32,       // Vertical field of view in degrees
    aperture: f32,   // Lens diameter; zero is a pinhole
    focus_dist: f32, // Distance from camera to plane of perfect focus
    aspect_ratio: f32,

    // Shutter
    time0: f32,
    time1: f32,

    // Cached computed values
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    onb: Onb,
    lens_radius: f32,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Point3::ORIGIN,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aperture: 0.0,
            focus_dist: 1.0,
            aspect_ratio: 16.0 / 9.0,
            time0: 0.0,
            time1: 1.0,
            // Cached values (filled in by update())
            origin: Point3::ORIGIN,
            lower_left_corner: Point3::ORIGIN,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            onb: Onb::from_w_and_up(Vec3::Z, Vec3::Y),
            lens_radius: 0.0,
        };
        camera.update();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self.update();
        self
    }

    /// Set the image aspect ratio (width / height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.update();
        self
    }

    /// Set the interval over which ray times are drawn.
    pub fn with_shutter(mut self, open: f32, close: f32) -> Self {
        self.time0 = open;
        self.time1 = close;
        self.update();
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn shutter(&self) -> (f32, f32) {
        (self.time0, self.time1)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Recompute the viewport from the current settings.
    fn update(&mut self) {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        self.onb = Onb::from_w_and_up(self.look_from - self.look_at, self.vup);
        self.origin = self.look_from;

        // Viewport lives on the plane of focus
        self.horizontal = self.onb.u * (viewport_width * self.focus_dist);
        self.vertical = self.onb.v * (viewport_height * self.focus_dist);
        self.lower_left_corner = self.origin
            - self.horizontal / 2.0
            - self.vertical / 2.0
            - self.onb.w * self.focus_dist;

        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through viewport coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner and `(1, 1)` the upper-right.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let origin = if self.lens_radius != 0.0 {
            self.origin + self.onb.local(random_in_unit_disk(rng) * self.lens_radius)
        } else {
            self.origin
        };

        let target = self.lower_left_corner + self.horizontal * s + self.vertical * t;
        let time = gen_range(rng, self.time0, self.time1);

        Ray::between(origin, target, time)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
