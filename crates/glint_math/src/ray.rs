use crate::{Point3, Vec3};

/// A ray in 3D space with origin, direction, and time.
///
/// `P(t) = origin + t * direction`. The `time` field picks the instant at
/// which moving geometry is sampled, which is how motion blur works.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Create a ray keeping `direction` exactly as given.
    ///
    /// Transform wrappers use this so that `t` values measured in object
    /// space stay valid in world space.
    #[inline]
    pub fn new(origin: Point3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Create a ray with a unit-length copy of `direction`.
    #[inline]
    pub fn from_direction(origin: Point3, direction: Vec3, time: f32) -> Self {
        Self::new(origin, direction.normalize_or_zero(), time)
    }

    /// Create a unit-direction ray from `origin` towards `target`.
    #[inline]
    pub fn between(origin: Point3, target: Point3, time: f32) -> Self {
        Self::from_direction(origin, target - origin, time)
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Get the point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}
