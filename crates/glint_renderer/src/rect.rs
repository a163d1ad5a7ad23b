//! Axis-aligned rectangles.
//!
//! Walls, floors and area lights of box-shaped scenes. A rectangle lies in
//! one of the three coordinate planes at a fixed offset `k` along the
//! remaining axis.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::sampling::gen_range;
use glint_math::{Aabb, Interval, Point3, Ray, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Half-thickness given to the bounding box along the fixed axis.
const EXTRUDE: f32 = 1e-4;

/// Coordinate plane a rectangle lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// Indices of the two in-plane axes `(a, b)` and the fixed axis `k`.
    fn axes(self) -> (usize, usize, usize) {
        match self {
            Plane::XY => (0, 1, 2),
            Plane::XZ => (0, 2, 1),
            Plane::YZ => (1, 2, 0),
        }
    }
}

/// A rectangle `[a0, a1] x [b0, b1]` in `plane` at offset `k`.
///
/// The outward normal is the positive fixed axis (+Z, +Y or +X).
pub struct AaRect {
    plane: Plane,
    a0: f32,
    a1: f32,
    b0: f32,
    b1: f32,
    k: f32,
    material: Arc<dyn Material>,
}

impl AaRect {
    pub fn new(
        plane: Plane,
        a0: f32,
        a1: f32,
        b0: f32,
        b1: f32,
        k: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            plane,
            a0,
            a1,
            b0,
            b1,
            k,
            material,
        }
    }

    /// Rectangle `[x0, x1] x [y0, y1]` at `z = k`.
    pub fn xy(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::XY, x0, x1, y0, y1, k, material)
    }

    /// Rectangle `[x0, x1] x [z0, z1]` at `y = k`.
    pub fn xz(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::XZ, x0, x1, z0, z1, k, material)
    }

    /// Rectangle `[y0, y1] x [z0, z1]` at `x = k`.
    pub fn yz(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<dyn Material>) -> Self {
        Self::new(Plane::YZ, y0, y1, z0, z1, k, material)
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn area(&self) -> f32 {
        (self.a1 - self.a0) * (self.b1 - self.b0)
    }

    /// Place in-plane coordinates and an offset back into 3D.
    fn point(&self, a: f32, b: f32, k: f32) -> Point3 {
        let (ai, bi, ki) = self.plane.axes();
        let mut p = [0.0; 3];
        p[ai] = a;
        p[bi] = b;
        p[ki] = k;
        Point3::from(p)
    }
}

impl Hittable for AaRect {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let (ai, bi, ki) = self.plane.axes();
        let origin = ray.origin();
        let direction = ray.direction();

        let t = (self.k - origin[ki]) / direction[ki];
        if !ray_t.contains(t) {
            return false;
        }

        // Range checks also reject the NaN of a ray parallel to the plane
        let a = origin[ai] + t * direction[ai];
        let b = origin[bi] + t * direction[bi];
        if !(self.a0..=self.a1).contains(&a) || !(self.b0..=self.b1).contains(&b) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.u = (a - self.a0) / (self.a1 - self.a0);
        rec.v = (b - self.b0) / (self.b1 - self.b0);
        rec.set_face_normal(ray, Vec3::AXES[ki]);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        Aabb::new(
            self.point(self.a0, self.b0, self.k - EXTRUDE),
            self.point(self.a1, self.b1, self.k + EXTRUDE),
        )
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f32 {
        let direction = direction.normalize_or_zero();
        let ray = Ray::new(origin, direction, 0.0);
        let mut rec = HitRecord::default();
        if !self.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
            return 0.0;
        }

        let distance_squared = rec.t * rec.t;
        let cosine = direction.dot(rec.normal).abs();
        distance_squared / (cosine * self.area())
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        let a = gen_range(rng, self.a0, self.a1);
        let b = gen_range(rng, self.b0, self.b1);
        self.point(a, b, self.k) - origin
    }
}
