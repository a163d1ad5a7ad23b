//! Sphere primitives for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::sampling::{cone_cos_theta_max, random_to_sphere, random_unit_vector};
use glint_math::{Aabb, Interval, Onb, Point3, Ray, Vec3};
use rand::RngCore;
use std::f32::consts::PI;
use std::sync::Arc;

/// A static sphere.
///
/// A negative radius is allowed: the geometry is the same but the normals
/// point inward, which turns the sphere into a hollow shell when nested
/// inside a glass sphere.
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        hit_sphere(self.center, self.radius, self.material.as_ref(), ray, ray_t, rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        sphere_box(self.center, self.radius)
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f32 {
        let mut rec = HitRecord::default();
        let ray = Ray::from_direction(origin, direction, 0.0);
        if !self.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec) {
            return 0.0;
        }

        let distance_squared = self.center.distance_squared(origin);
        if distance_squared <= self.radius * self.radius {
            // From inside, every direction reaches the surface
            return 1.0 / (4.0 * PI);
        }

        let cos_theta_max = cone_cos_theta_max(self.radius, distance_squared);
        let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
        1.0 / solid_angle
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        let direction = self.center - origin;
        let distance_squared = direction.length_squared();
        if distance_squared <= self.radius * self.radius {
            return random_unit_vector(rng);
        }

        let uvw = Onb::from_w(direction);
        uvw.local(random_to_sphere(rng, self.radius, distance_squared))
    }
}

/// A sphere whose center moves linearly from `center0` at `time0` to
/// `center1` at `time1`. Rays sample it at their own time stamp.
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f32,
    time1: f32,
    radius: f32,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        center0: Point3,
        center1: Point3,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Center at the given time. A zero-length motion interval pins the
    /// sphere at `center0`.
    pub fn center(&self, time: f32) -> Point3 {
        if self.time1 == self.time0 {
            return self.center0;
        }
        let s = (time - self.time0) / (self.time1 - self.time0);
        self.center0 + (self.center1 - self.center0) * s
    }
}

impl Hittable for MovingSphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let center = self.center(ray.time());
        hit_sphere(center, self.radius, self.material.as_ref(), ray, ray_t, rec)
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        let box0 = sphere_box(self.center(time0), self.radius);
        let box1 = sphere_box(self.center(time1), self.radius);
        Aabb::surrounding(&box0, &box1)
    }
}

/// Shared ray-sphere intersection.
///
/// Takes the nearer root inside `ray_t` (bounds inclusive), else the
/// farther one.
fn hit_sphere<'a>(
    center: Point3,
    radius: f32,
    material: &'a dyn Material,
    ray: &Ray,
    ray_t: Interval,
    rec: &mut HitRecord<'a>,
) -> bool {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return false;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.contains(root) {
        root = (h + sqrtd) / a;
        if !ray_t.contains(root) {
            return false;
        }
    }

    rec.t = root;
    rec.p = ray.at(root);
    let outward_normal = (rec.p - center) / radius;
    rec.set_face_normal(ray, outward_normal);
    (rec.u, rec.v) = get_sphere_uv(outward_normal);
    rec.material = material;

    true
}

fn sphere_box(center: Point3, radius: f32) -> Aabb {
    let rvec = Vec3::splat(radius.abs());
    Aabb::new(center - rvec, center + rvec)
}

/// UV coordinates of a point on the unit sphere.
///
/// `u` runs around the Y axis starting from -X, `v` runs from the south
/// pole (`v = 0`) to the north pole (`v = 1`).
pub(crate) fn get_sphere_uv(p: Vec3) -> (f32, f32) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    let u = phi / (2.0 * PI);
    let v = theta / PI;
    (u, v)
}
