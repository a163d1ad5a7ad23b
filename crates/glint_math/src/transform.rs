// Bounding box transforms for instancing wrappers.
//
// glam already transforms points and vectors; what it lacks is the
// axis-aligned envelope of a transformed box.

use crate::{Aabb, AabbBuilder, Point3};
use glam::Mat3;

/// Extension trait for glam rotation matrices that move bounding boxes.
pub trait AabbTransform {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl AabbTransform for Mat3 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let mut builder = AabbBuilder::new();
        for corner in aabb.corners() {
            builder.add_point(Point3::from_vec(*self * corner.to_vec()));
        }
        builder.build()
    }
}
