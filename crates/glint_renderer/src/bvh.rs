//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over the scene's primitives. Each level splits its objects
//! in half along a randomly chosen axis, which is cheap to build and good
//! enough for the scene sizes this renderer deals with.

use crate::{HitRecord, Hittable, HittableList};
use glint_math::sampling::gen_index;
use glint_math::{Aabb, Interval, Ray};
use rand::RngCore;

/// BVH node - either a branch with two children or a leaf holding a
/// single primitive.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with exactly one primitive.
    Leaf {
        object: Box<dyn Hittable>,
        bbox: Aabb,
    },
}

/// Shape of a built tree, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvhStats {
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    ///
    /// Bounding boxes are taken over the shutter interval `[time0, time1]`.
    ///
    /// # Panics
    ///
    /// Panics if `objects` is empty. Callers with possibly-empty scenes
    /// should use a [`HittableList`] instead.
    pub fn new(
        objects: Vec<Box<dyn Hittable>>,
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Self {
        assert!(
            !objects.is_empty(),
            "cannot build a BVH over an empty object list"
        );

        let root = Self::build(objects, time0, time1, rng);

        let stats = root.stats();
        log::debug!(
            "Built BVH: {} primitives, {} nodes, depth {}",
            stats.leaves,
            stats.nodes,
            stats.depth
        );

        root
    }

    /// Build a BVH over the members of a list.
    ///
    /// # Panics
    ///
    /// Panics if the list is empty.
    pub fn from_list(list: HittableList, time0: f32, time1: f32, rng: &mut dyn RngCore) -> Self {
        Self::new(list.into_objects(), time0, time1, rng)
    }

    /// Recursive construction: sort by box minimum on a random axis,
    /// split in half, recurse.
    fn build(
        mut objects: Vec<Box<dyn Hittable>>,
        time0: f32,
        time1: f32,
        rng: &mut dyn RngCore,
    ) -> Self {
        if objects.len() == 1 {
            let object = objects.remove(0);
            let bbox = object.bounding_box(time0, time1);
            return BvhNode::Leaf { object, bbox };
        }

        let axis = gen_index(rng, 3);

        // Stable sort keeps build order deterministic for equal keys
        objects.sort_by(|a, b| {
            let a_min = a.bounding_box(time0, time1).axis_min(axis);
            let b_min = b.bounding_box(time0, time1).axis_min(axis);
            a_min.total_cmp(&b_min)
        });

        // Split at midpoint
        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);
        let left_objects = objects;

        // Recurse
        let left = Self::build(left_objects, time0, time1, rng);
        let right = Self::build(right_objects, time0, time1, rng);

        let bbox = Aabb::surrounding(&left.bbox(), &right.bbox());

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    fn bbox(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bbox, .. } | BvhNode::Branch { bbox, .. } => *bbox,
        }
    }

    /// Count nodes and leaves and measure depth (a lone leaf has depth 1).
    pub fn stats(&self) -> BvhStats {
        match self {
            BvhNode::Leaf { .. } => BvhStats {
                nodes: 1,
                leaves: 1,
                depth: 1,
            },
            BvhNode::Branch { left, right, .. } => {
                let l = left.stats();
                let r = right.stats();
                BvhStats {
                    nodes: 1 + l.nodes + r.nodes,
                    leaves: l.leaves + r.leaves,
                    depth: 1 + l.depth.max(r.depth),
                }
            }
        }
    }
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Leaf { object, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }
                object.hit(ray, ray_t, rec)
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Aabb {
        self.bbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Material, Sphere};
    use glint_math::sampling::{gen_range, random_unit_vector};
    use glint_math::{Point3, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn sphere_row(n: usize) -> Vec<Box<dyn Hittable>> {
        (0..n)
            .map(|i| {
                Box::new(Sphere::new(Point3::new(i as f32, 0.0, -5.0), 0.4, gray()))
                    as Box<dyn Hittable>
            })
            .collect()
    }

    #[test]
    #[should_panic(expected = "empty")]
    fn test_bvh_empty_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        let _ = BvhNode::new(Vec::new(), 0.0, 1.0, &mut rng);
    }

    #[test]
    fn test_bvh_single_sphere() {
        let mut rng = StdRng::seed_from_u64(1);
        let bvh = BvhNode::new(sphere_row(1), 0.0, 1.0, &mut rng);

        // Should create a leaf
        assert!(matches!(bvh, BvhNode::Leaf { .. }));

        // Test ray hit
        let ray = Ray::new(Point3::ORIGIN, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rec = HitRecord::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let mut rng = StdRng::seed_from_u64(2);
        let bvh = BvhNode::new(sphere_row(10), 0.0, 1.0, &mut rng);

        // Test ray that hits sphere at x=5
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let mut rec = HitRecord::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));

        // Hit point should be near z = -4.6 (sphere at z=-5, radius 0.4)
        assert!((rec.p.z - (-4.6)).abs() < 0.01);

        let bbox = bvh.bounding_box(0.0, 1.0);
        assert!((bbox.min - Point3::new(-0.4, -0.4, -5.4)).length() < 1e-5);
        assert!((bbox.max - Point3::new(9.4, 0.4, -4.6)).length() < 1e-5);
    }

    #[test]
    fn test_bvh_stats() {
        let mut rng = StdRng::seed_from_u64(3);
        let bvh = BvhNode::new(sphere_row(8), 0.0, 1.0, &mut rng);
        assert_eq!(
            bvh.stats(),
            BvhStats {
                nodes: 15,
                leaves: 8,
                depth: 4
            }
        );
    }

    #[test]
    fn test_bvh_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(4);

        let mut list = HittableList::new();
        let mut objects: Vec<Box<dyn Hittable>> = Vec::new();
        for _ in 0..200 {
            let center = Point3::new(
                gen_range(&mut rng, -10.0, 10.0),
                gen_range(&mut rng, -10.0, 10.0),
                gen_range(&mut rng, -10.0, 10.0),
            );
            let radius = gen_range(&mut rng, 0.2, 1.5);
            let material = gray();
            list.add(Box::new(Sphere::new(center, radius, material.clone())));
            objects.push(Box::new(Sphere::new(center, radius, material)));
        }
        let bvh = BvhNode::new(objects, 0.0, 1.0, &mut rng);

        let ray_t = Interval::new(0.001, f32::INFINITY);
        let mut hits = 0;
        for _ in 0..2000 {
            let origin = Point3::new(
                gen_range(&mut rng, -20.0, 20.0),
                gen_range(&mut rng, -20.0, 20.0),
                gen_range(&mut rng, -20.0, 20.0),
            );
            let ray = Ray::new(origin, random_unit_vector(&mut rng), 0.0);

            let mut linear_rec = HitRecord::default();
            let mut bvh_rec = HitRecord::default();
            let linear_hit = list.hit(&ray, ray_t, &mut linear_rec);
            let bvh_hit = bvh.hit(&ray, ray_t, &mut bvh_rec);

            assert_eq!(linear_hit, bvh_hit);
            if linear_hit {
                hits += 1;
                assert_eq!(linear_rec.t, bvh_rec.t);
                let a = (linear_rec.material as *const dyn Material).cast::<()>();
                let b = (bvh_rec.material as *const dyn Material).cast::<()>();
                assert_eq!(a, b, "different material for the closest hit");
            }
        }

        // Make sure the comparison is not vacuous
        assert!(hits > 100, "only {hits} rays hit anything");
    }
}
