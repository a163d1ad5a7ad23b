//! Direction sampling densities for importance sampling.
//!
//! A `Pdf` can both draw a direction and report the density it would draw
//! a given direction with. The integrator mixes a cosine lobe with a
//! density aimed at the lights.

use crate::Hittable;
use glint_math::sampling::{gen_f32, random_cosine_direction};
use glint_math::{Onb, Point3, Vec3};
use rand::RngCore;
use std::f32::consts::PI;

pub trait Pdf {
    /// Density of `direction` (solid angle measure).
    fn value(&self, direction: Vec3) -> f32;

    /// Draw a direction. Not necessarily unit length.
    fn generate(&self, rng: &mut dyn RngCore) -> Vec3;
}

/// Cosine-weighted hemisphere around a normal.
pub struct CosinePdf {
    uvw: Onb,
}

impl CosinePdf {
    pub fn new(w: Vec3) -> Self {
        Self {
            uvw: Onb::from_w(w),
        }
    }
}

impl Pdf for CosinePdf {
    fn value(&self, direction: Vec3) -> f32 {
        let cosine = direction.normalize_or_zero().dot(self.uvw.w);
        if cosine <= 0.0 {
            0.0
        } else {
            cosine / PI
        }
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.uvw.local(random_cosine_direction(rng))
    }
}

/// Directions from `origin` towards a hittable, usually the light set.
pub struct HittablePdf<'a> {
    object: &'a dyn Hittable,
    origin: Point3,
}

impl<'a> HittablePdf<'a> {
    pub fn new(object: &'a dyn Hittable, origin: Point3) -> Self {
        Self { object, origin }
    }
}

impl Pdf for HittablePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        self.object.pdf_value(self.origin, direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(self.origin, rng)
    }
}

/// Equal-weight blend of two densities.
pub struct MixturePdf<'a> {
    a: &'a dyn Pdf,
    b: &'a dyn Pdf,
}

impl<'a> MixturePdf<'a> {
    pub fn new(a: &'a dyn Pdf, b: &'a dyn Pdf) -> Self {
        Self { a, b }
    }
}

impl Pdf for MixturePdf<'_> {
    fn value(&self, direction: Vec3) -> f32 {
        0.5 * self.a.value(direction) + 0.5 * self.b.value(direction)
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec3 {
        if gen_f32(rng) < 0.5 {
            self.a.generate(rng)
        } else {
            self.b.generate(rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaRect, Lambertian, Material};
    use glint_math::sampling::random_unit_vector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn light() -> AaRect {
        let material: Arc<dyn Material> = Arc::new(Lambertian::from_color(Vec3::ONE));
        AaRect::xz(-1.0, 1.0, -1.0, 1.0, 4.0, material)
    }

    #[test]
    fn test_cosine_pdf_integrates_to_one() {
        let pdf = CosinePdf::new(Vec3::new(0.3, 1.0, -0.2));
        let mut rng = StdRng::seed_from_u64(1);

        let n = 200_000;
        let sum: f64 = (0..n)
            .map(|_| pdf.value(random_unit_vector(&mut rng)) as f64)
            .sum();
        let integral = 4.0 * PI * (sum / n as f64) as f32;
        assert!((integral - 1.0).abs() < 0.02, "integral = {integral}");
    }

    #[test]
    fn test_cosine_pdf_generates_upper_hemisphere() {
        let w = Vec3::new(1.0, 1.0, 0.0).normalize();
        let pdf = CosinePdf::new(w);
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..500 {
            let dir = pdf.generate(&mut rng);
            assert!(dir.dot(w) >= -1e-6);
        }
        assert_eq!(pdf.value(-w), 0.0);
    }

    #[test]
    fn test_hittable_pdf_forwards_to_object() {
        let rect = light();
        let origin = Point3::ORIGIN;
        let pdf = HittablePdf::new(&rect, origin);

        assert_eq!(pdf.value(Vec3::Y), rect.pdf_value(origin, Vec3::Y));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(pdf.value(pdf.generate(&mut rng)) > 0.0);
        }
    }

    #[test]
    fn test_mixture_pdf_blends_evenly() {
        let rect = light();
        let light_pdf = HittablePdf::new(&rect, Point3::ORIGIN);
        let cosine_pdf = CosinePdf::new(Vec3::Y);
        let mixture = MixturePdf::new(&light_pdf, &cosine_pdf);

        let dir = Vec3::Y;
        let expected = 0.5 * light_pdf.value(dir) + 0.5 * cosine_pdf.value(dir);
        assert!((mixture.value(dir) - expected).abs() < 1e-6);

        // Roughly half of the samples come from each component
        let mut rng = StdRng::seed_from_u64(4);
        let n = 4000;
        let towards_light = (0..n)
            .filter(|_| {
                let d = mixture.generate(&mut rng);
                // Light samples are unnormalized vectors to y = 4
                (d.y - 4.0).abs() < 1e-4
            })
            .count();
        let fraction = towards_light as f32 / n as f32;
        assert!((fraction - 0.5).abs() < 0.05, "fraction = {fraction}");
    }
}
