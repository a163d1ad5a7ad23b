use crate::Vec3;

/// Orthonormal basis `(u, v, w)`.
///
/// Used to express samples generated around the Z axis (cosine lobes,
/// cones toward a light) in the frame of a surface normal or a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Onb {
    /// Build a basis whose `w` axis is `n` (normalized).
    pub fn from_w(n: Vec3) -> Self {
        let w = n.normalize_or_zero();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize_or_zero();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Camera-style basis: `w` along `backward`, `u` to the right of `up`.
    pub fn from_w_and_up(backward: Vec3, up: Vec3) -> Self {
        let w = backward.normalize_or_zero();
        let u = up.cross(w).normalize_or_zero();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Express basis-local coordinates `(a, b, c)` in world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}
