//! Random deviates and direction samplers.
//!
//! Every function takes the generator explicitly. Render workers each own
//! their own generator, so nothing here is shared between threads.

use crate::Vec3;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Uniform deviate in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform deviate in `[min, max)`. `min == max` returns `min`.
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniform index in `0..n`. `n` must be positive.
#[inline]
pub fn gen_index(rng: &mut dyn RngCore, n: usize) -> usize {
    rng.gen_range(0..n)
}

/// Uniform point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Uniform direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Uniform point inside the unit disk in the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Unit direction in the +Z hemisphere with density `cos(theta) / pi`.
pub fn random_cosine_direction(rng: &mut dyn RngCore) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);

    let phi = 2.0 * PI * r1;
    let z = (1.0 - r2).sqrt();
    let r = r2.sqrt();
    Vec3::new(phi.cos() * r, phi.sin() * r, z)
}

/// Unit direction inside the cone (around +Z) subtended by a sphere of
/// `radius` whose center is `distance_squared` away. Uniform in solid angle.
pub fn random_to_sphere(rng: &mut dyn RngCore, radius: f32, distance_squared: f32) -> Vec3 {
    let r1 = gen_f32(rng);
    let r2 = gen_f32(rng);
    let cos_theta_max = cone_cos_theta_max(radius, distance_squared);

    let z = 1.0 + r2 * (cos_theta_max - 1.0);
    let phi = 2.0 * PI * r1;
    let sin_theta = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(phi.cos() * sin_theta, phi.sin() * sin_theta, z)
}

/// Cosine of the half-angle of the cone subtended by a sphere.
///
/// Zero when the viewpoint is inside the sphere (the cone is a hemisphere).
#[inline]
pub fn cone_cos_theta_max(radius: f32, distance_squared: f32) -> f32 {
    (1.0 - radius * radius / distance_squared).max(0.0).sqrt()
}
