use crate::sampling::random_in_unit_sphere;
use crate::{Point3, Vec3};
use rand::seq::SliceRandom;
use rand::RngCore;

const POINT_COUNT: usize = 256;
const MASK: i32 = (POINT_COUNT - 1) as i32;

/// Gradient (Perlin) noise over a lattice of random vectors.
pub struct Perlin {
    gradients: Vec<Vec3>,
    perm_x: Vec<usize>,
    perm_y: Vec<usize>,
    perm_z: Vec<usize>,
}

impl Perlin {
    pub fn new(rng: &mut dyn RngCore) -> Self {
        let gradients = (0..POINT_COUNT)
            .map(|_| random_in_unit_sphere(rng))
            .collect();

        Self {
            gradients,
            perm_x: permutation(rng),
            perm_y: permutation(rng),
            perm_z: permutation(rng),
        }
    }

    /// Smooth noise in roughly `[-1, 1]`.
    pub fn noise(&self, p: Point3) -> f32 {
        let u = p.x - p.x.floor();
        let v = p.y - p.y.floor();
        let w = p.z - p.z.floor();

        let i = p.x.floor() as i32;
        let j = p.y.floor() as i32;
        let k = p.z.floor() as i32;

        let mut c = [[[Vec3::ZERO; 2]; 2]; 2];
        for (di, plane) in c.iter_mut().enumerate() {
            for (dj, row) in plane.iter_mut().enumerate() {
                for (dk, cell) in row.iter_mut().enumerate() {
                    let index = self.perm_x[((i + di as i32) & MASK) as usize]
                        ^ self.perm_y[((j + dj as i32) & MASK) as usize]
                        ^ self.perm_z[((k + dk as i32) & MASK) as usize];
                    *cell = self.gradients[index];
                }
            }
        }

        trilinear_interp(&c, u, v, w)
    }

    /// Sum of `depth` octaves of noise, each at double the frequency and
    /// half the weight of the previous one. Always non-negative.
    pub fn turbulence(&self, p: Point3, depth: usize) -> f32 {
        let mut accum = 0.0;
        let mut temp = p.to_vec();
        let mut weight = 1.0;

        for _ in 0..depth {
            accum += weight * self.noise(Point3::from_vec(temp));
            weight *= 0.5;
            temp *= 2.0;
        }

        accum.abs()
    }
}

fn permutation(rng: &mut dyn RngCore) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..POINT_COUNT).collect();
    perm.shuffle(rng);
    perm
}

/// Hermite-smoothed trilinear blend of the gradient contributions. The
/// smoothed coordinates drive both the blend weights and the offsets the
/// gradients are dotted with.
fn trilinear_interp(c: &[[[Vec3; 2]; 2]; 2], u: f32, v: f32, w: f32) -> f32 {
    let uu = u * u * (3.0 - 2.0 * u);
    let vv = v * v * (3.0 - 2.0 * v);
    let ww = w * w * (3.0 - 2.0 * w);

    let mut accum = 0.0;
    for (i, plane) in c.iter().enumerate() {
        for (j, row) in plane.iter().enumerate() {
            for (k, gradient) in row.iter().enumerate() {
                let (fi, fj, fk) = (i as f32, j as f32, k as f32);
                let weight = Vec3::new(uu - fi, vv - fj, ww - fk);
                accum += (fi * uu + (1.0 - fi) * (1.0 - uu))
                    * (fj * vv + (1.0 - fj) * (1.0 - vv))
                    * (fk * ww + (1.0 - fk) * (1.0 - ww))
                    * gradient.dot(weight);
            }
        }
    }
    accum
}
