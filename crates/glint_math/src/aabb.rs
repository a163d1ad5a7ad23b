use crate::{Interval, Point3, Ray, Vec3};

/// Thickness given to flat boxes so the slab test never sees a zero-width slab.
const MIN_THICKNESS: f32 = 1e-4;

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Invariant: `min <= max` componentwise, except for [`Aabb::EMPTY`] which
/// is the identity of [`Aabb::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Contains nothing; `surrounding(EMPTY, b) == b`.
    pub const EMPTY: Aabb = Aabb {
        min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Box spanned by two opposite corners given in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Copy of this box with every axis at least `1e-4` thick.
    ///
    /// Flat primitives (rectangles, axis-aligned triangles) produce boxes
    /// with a zero-width axis, which the slab test cannot hit reliably.
    pub fn padded(&self) -> Aabb {
        let mut min = self.min;
        let mut max = self.max;
        if max.x - min.x < MIN_THICKNESS {
            min.x -= MIN_THICKNESS / 2.0;
            max.x += MIN_THICKNESS / 2.0;
        }
        if max.y - min.y < MIN_THICKNESS {
            min.y -= MIN_THICKNESS / 2.0;
            max.y += MIN_THICKNESS / 2.0;
        }
        if max.z - min.z < MIN_THICKNESS {
            min.z -= MIN_THICKNESS / 2.0;
            max.z += MIN_THICKNESS / 2.0;
        }
        Aabb { min, max }
    }

    /// Smallest box containing both inputs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Aabb {
        Aabb {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Lower bound along axis `n` (0=X, 1=Y, 2=Z).
    pub fn axis_min(&self, n: usize) -> f32 {
        self.min[n]
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Slab method. A ray parallel to a slab hits only if its origin lies
    /// within the slab, boundary planes included.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let origin = r.origin[axis];
            let dir = r.direction[axis];
            if dir == 0.0 {
                if origin < self.min[axis] || origin > self.max[axis] {
                    return false;
                }
                continue;
            }

            let t1 = (self.min[axis] - origin) / dir;
            let t2 = (self.max[axis] - origin) / dir;

            ray_t.min = ray_t.min.max(t1.min(t2));
            ray_t.max = ray_t.max.min(t1.max(t2));
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Move the box by an offset vector.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// The eight corner points.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    pub fn centroid(&self) -> Point3 {
        self.min.lerp(self.max, 0.5)
    }
}

/// Accumulates a bounding box from a stream of points.
///
/// With no points added the result is a zero-size box at the origin, which
/// is what an empty mesh reports.
#[derive(Debug, Clone)]
pub struct AabbBuilder {
    bounds: Aabb,
    count: usize,
}

impl AabbBuilder {
    pub fn new() -> Self {
        Self {
            bounds: Aabb::EMPTY,
            count: 0,
        }
    }

    pub fn add_point(&mut self, p: Point3) {
        self.bounds.min = self.bounds.min.min(p);
        self.bounds.max = self.bounds.max.max(p);
        self.count += 1;
    }

    pub fn build(&self) -> Aabb {
        if self.count == 0 {
            return Aabb::new(Point3::ORIGIN, Point3::ORIGIN);
        }
        self.bounds
    }
}

impl Default for AabbBuilder {
    fn default() -> Self {
        Self::new()
    }
}
