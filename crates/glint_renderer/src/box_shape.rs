//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    AaRect, Material,
};
use glint_math::{Aabb, Interval, Point3, Ray};
use std::sync::Arc;

/// A closed box between two opposite corners. All six sides share one
/// material.
pub struct BoxShape {
    bbox: Aabb,
    sides: HittableList,
}

impl BoxShape {
    pub fn new(p0: Point3, p1: Point3, material: Arc<dyn Material>) -> Self {
        let bbox = Aabb::new(p0, p1);
        let (lo, hi) = (bbox.min, bbox.max);

        let mut sides = HittableList::new();
        sides.add(Box::new(AaRect::xy(lo.x, hi.x, lo.y, hi.y, hi.z, material.clone())));
        sides.add(Box::new(AaRect::xy(lo.x, hi.x, lo.y, hi.y, lo.z, material.clone())));
        sides.add(Box::new(AaRect::xz(lo.x, hi.x, lo.z, hi.z, hi.y, material.clone())));
        sides.add(Box::new(AaRect::xz(lo.x, hi.x, lo.z, hi.z, lo.y, material.clone())));
        sides.add(Box::new(AaRect::yz(lo.y, hi.y, lo.z, hi.z, hi.x, material.clone())));
        sides.add(Box::new(AaRect::yz(lo.y, hi.y, lo.z, hi.z, lo.x, material)));

        Self { bbox, sides }
    }
}

impl Hittable for BoxShape {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.sides.hit(ray, ray_t, rec)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.bbox
    }
}
