//! Instancing wrappers: translation, rotation about Y, and face flipping.
//!
//! Each wrapper moves the incoming ray into the child's frame, lets the
//! child intersect it, and moves the result back. Ray directions are never
//! renormalized on the way, so `t` means the same thing in both frames.

use crate::hittable::{HitRecord, Hittable};
use glint_math::{Aabb, AabbTransform, Interval, Mat3, Point3, Ray, Vec3};
use rand::RngCore;

/// Moves a child object by a fixed offset.
pub struct Translate {
    object: Box<dyn Hittable>,
    offset: Vec3,
}

impl Translate {
    pub fn new(object: Box<dyn Hittable>, offset: Vec3) -> Self {
        Self { object, offset }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let moved = Ray::new(ray.origin() - self.offset, ray.direction(), ray.time());
        if !self.object.hit(&moved, ray_t, rec) {
            return false;
        }

        // Normal and front_face are unaffected by a translation
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.object.bounding_box(time0, time1).translate(self.offset)
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f32 {
        self.object.pdf_value(origin - self.offset, direction)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(origin - self.offset, rng)
    }
}

/// Rotates a child object about the world Y axis.
pub struct RotateY {
    object: Box<dyn Hittable>,
    to_world: Mat3,
    to_object: Mat3,
    bbox: Aabb,
}

impl RotateY {
    /// Rotate `object` by `degrees` counter-clockwise when seen from +Y.
    ///
    /// The bounding box is computed once from the child's box over the
    /// shutter interval `[0, 1]`.
    pub fn new(object: Box<dyn Hittable>, degrees: f32) -> Self {
        let radians = degrees.to_radians();
        let to_world = Mat3::from_rotation_y(radians);
        let to_object = Mat3::from_rotation_y(-radians);
        let bbox = to_world.transform_aabb(&object.bounding_box(0.0, 1.0));

        Self {
            object,
            to_world,
            to_object,
            bbox,
        }
    }

    fn point_to_object(&self, p: Point3) -> Point3 {
        Point3::from_vec(self.to_object * p.to_vec())
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let rotated = Ray::new(
            self.point_to_object(ray.origin()),
            self.to_object * ray.direction(),
            ray.time(),
        );
        if !self.object.hit(&rotated, ray_t, rec) {
            return false;
        }

        // Rotations preserve dot products, so front_face still holds
        rec.p = Point3::from_vec(self.to_world * rec.p.to_vec());
        rec.normal = self.to_world * rec.normal;
        true
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f32 {
        self.object
            .pdf_value(self.point_to_object(origin), self.to_object * direction)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        self.to_world * self.object.random(self.point_to_object(origin), rng)
    }
}

/// Reports the child's hits with the opposite facing.
///
/// Used to make a one-sided emitter face the other way, e.g. a ceiling
/// light that should shine downward.
pub struct FlipFace {
    object: Box<dyn Hittable>,
}

impl FlipFace {
    pub fn new(object: Box<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipFace {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        if !self.object.hit(ray, ray_t, rec) {
            return false;
        }
        rec.front_face = !rec.front_face;
        true
    }

    fn bounding_box(&self, time0: f32, time1: f32) -> Aabb {
        self.object.bounding_box(time0, time1)
    }

    fn pdf_value(&self, origin: Point3, direction: Vec3) -> f32 {
        self.object.pdf_value(origin, direction)
    }

    fn random(&self, origin: Point3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::{AaRect, BoxShape, Material, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn ray_t() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_translate_hit_lands_at_offset() {
        let sphere = Box::new(Sphere::new(Point3::ORIGIN, 1.0, gray()));
        let moved = Translate::new(sphere, Vec3::new(10.0, 0.0, 0.0));

        let ray = Ray::new(Point3::new(10.0, 0.0, 5.0), -Vec3::Z, 0.0);
        let mut rec = HitRecord::default();
        assert!(moved.hit(&ray, ray_t(), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!((rec.p - Point3::new(10.0, 0.0, 1.0)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);

        // The untranslated position is now empty
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0);
        assert!(!moved.hit(&ray, ray_t(), &mut rec));

        let bbox = moved.bounding_box(0.0, 1.0);
        assert_eq!(bbox.min, Point3::new(9.0, -1.0, -1.0));
        assert_eq!(bbox.max, Point3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn test_translate_forwards_light_sampling() {
        let offset = Vec3::new(0.0, 3.0, 0.0);
        let light = Translate::new(
            Box::new(AaRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, gray())),
            offset,
        );
        let reference = AaRect::xz(-1.0, 1.0, -1.0, 1.0, 5.0, gray());

        let origin = Point3::new(0.2, 0.0, -0.1);
        let pdf = light.pdf_value(origin, Vec3::Y);
        assert!(pdf > 0.0);
        assert!((pdf - reference.pdf_value(origin, Vec3::Y)).abs() < 1e-4);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let dir = light.random(origin, &mut rng);
            assert!((dir.y - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotate_y_hit() {
        // A thin slab along +X becomes a slab along -Z after 90 degrees
        let slab = Box::new(BoxShape::new(
            Point3::new(0.0, 0.0, -0.1),
            Point3::new(4.0, 1.0, 0.1),
            gray(),
        ));
        let rotated = RotateY::new(slab, 90.0);

        let mut rec = HitRecord::default();
        let down = Ray::new(Point3::new(0.0, 5.0, -3.0), -Vec3::Y, 0.0);
        assert!(rotated.hit(&down, ray_t(), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-4);
        assert!((rec.p - Point3::new(0.0, 1.0, -3.0)).length() < 1e-4);
        assert!((rec.normal - Vec3::Y).length() < 1e-4);

        // Where the unrotated slab used to be there is nothing now
        let down = Ray::new(Point3::new(3.0, 5.0, 0.0), -Vec3::Y, 0.0);
        assert!(!rotated.hit(&down, ray_t(), &mut rec));

        // Side hit: the +X face turned into a -Z face
        let side = Ray::new(Point3::new(0.0, 0.5, -10.0), Vec3::Z, 0.0);
        assert!(rotated.hit(&side, ray_t(), &mut rec));
        assert!((rec.p.z - (-4.0)).abs() < 1e-4);
        assert!((rec.normal - (-Vec3::Z)).length() < 1e-4);
        assert!(rec.front_face);
    }

    #[test]
    fn test_rotate_y_bbox_contains_rotated_corners() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(165.0, 330.0, 165.0);
        let rotated = RotateY::new(Box::new(BoxShape::new(p0, p1, gray())), 15.0);
        let bbox = rotated.bounding_box(0.0, 1.0);

        let to_world = Mat3::from_rotation_y(15f32.to_radians());
        for corner in Aabb::new(p0, p1).corners() {
            let p = Point3::from_vec(to_world * corner.to_vec());
            for axis in 0..3 {
                assert!(p[axis] >= bbox.min[axis] - 1e-3);
                assert!(p[axis] <= bbox.max[axis] + 1e-3);
            }
        }
    }

    #[test]
    fn test_rotate_y_forwards_light_sampling() {
        let light = RotateY::new(Box::new(AaRect::xz(1.0, 3.0, -1.0, 1.0, 4.0, gray())), 180.0);

        // After half a turn the rectangle spans x in [-3, -1]
        let origin = Point3::ORIGIN;
        let towards = Vec3::new(-2.0, 4.0, 0.0);
        assert!(light.pdf_value(origin, towards) > 0.0);
        assert_eq!(light.pdf_value(origin, Vec3::new(2.0, 4.0, 0.0)), 0.0);

        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let dir = light.random(origin, &mut rng);
            assert!(dir.x < -0.99 && dir.x > -3.01);
        }
    }

    #[test]
    fn test_flip_face_toggles_only_front_face() {
        let rect = AaRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, gray());
        let flipped = FlipFace::new(Box::new(AaRect::xz(-1.0, 1.0, -1.0, 1.0, 2.0, gray())));

        let ray = Ray::new(Point3::ORIGIN, Vec3::Y, 0.0);
        let mut plain = HitRecord::default();
        let mut flip = HitRecord::default();
        assert!(rect.hit(&ray, ray_t(), &mut plain));
        assert!(flipped.hit(&ray, ray_t(), &mut flip));

        assert_eq!(flip.front_face, !plain.front_face);
        assert_eq!(flip.t, plain.t);
        assert_eq!(flip.p, plain.p);
        assert_eq!(flip.normal, plain.normal);
        assert_eq!((flip.u, flip.v), (plain.u, plain.v));

        assert_eq!(flipped.bounding_box(0.0, 1.0), rect.bounding_box(0.0, 1.0));
        assert_eq!(
            flipped.pdf_value(Point3::ORIGIN, Vec3::Y),
            rect.pdf_value(Point3::ORIGIN, Vec3::Y)
        );
    }

    #[test]
    fn test_translate_keeps_flipped_face() {
        let light = Translate::new(
            Box::new(FlipFace::new(Box::new(AaRect::xz(-1.0, 1.0, -1.0, 1.0, 0.0, gray())))),
            Vec3::new(0.0, 2.0, 0.0),
        );

        // Looking up at a flipped ceiling light hits its front face
        let ray = Ray::new(Point3::ORIGIN, Vec3::Y, 0.0);
        let mut rec = HitRecord::default();
        assert!(light.hit(&ray, ray_t(), &mut rec));
        assert!(rec.front_face);
    }
}
