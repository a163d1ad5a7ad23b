//! Polygon meshes triangulated into a BVH of triangles.

use crate::{BvhNode, Hittable, HittableList, Material, Triangle};
use glint_math::{Point3, Vec3};
use rand::RngCore;
use std::f32::consts::PI;
use std::sync::Arc;

/// Incrementally assembles a polygon mesh.
///
/// Positions are added first and referenced by index from polygons.
/// Polygons are fan-triangulated when the mesh is built, so they should be
/// convex.
#[derive(Debug, Default, Clone)]
pub struct MeshBuilder {
    positions: Vec<Point3>,
    polygons: Vec<Vec<usize>>,
    current: Option<Vec<usize>>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex position and return its index.
    pub fn add_position(&mut self, p: Point3) -> usize {
        self.positions.push(p);
        self.positions.len() - 1
    }

    pub fn begin_polygon(&mut self) {
        self.current = Some(Vec::new());
    }

    /// Append a position index to the polygon being built.
    pub fn add_vertex(&mut self, index: usize) {
        self.current.get_or_insert_with(Vec::new).push(index);
    }

    /// Finish the current polygon. Polygons with fewer than three vertices
    /// or with indices that do not name a position are dropped.
    pub fn end_polygon(&mut self) {
        let Some(polygon) = self.current.take() else {
            return;
        };

        if polygon.len() < 3 {
            return;
        }
        if polygon.iter().any(|&i| i >= self.positions.len()) {
            log::warn!(
                "Dropping polygon with out-of-range vertex index ({} positions)",
                self.positions.len()
            );
            return;
        }
        self.polygons.push(polygon);
    }

    /// Add a whole polygon at once.
    pub fn add_polygon(&mut self, indices: &[usize]) {
        self.begin_polygon();
        for &i in indices {
            self.add_vertex(i);
        }
        self.end_polygon();
    }

    pub fn face_count(&self) -> usize {
        self.polygons.len()
    }

    /// Fan-triangulate every polygon. All triangles share `material`.
    pub fn triangles(&self, material: &Arc<dyn Material>) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for polygon in &self.polygons {
            let p0 = self.positions[polygon[0]];
            for pair in polygon[1..].windows(2) {
                triangles.push(Triangle::new(
                    p0,
                    self.positions[pair[0]],
                    self.positions[pair[1]],
                    material.clone(),
                ));
            }
        }
        triangles
    }

    /// Build the mesh into a BVH of triangles, or an empty list when no
    /// polygon survived.
    pub fn build(&self, material: Arc<dyn Material>, rng: &mut dyn RngCore) -> Box<dyn Hittable> {
        let faces: Vec<Box<dyn Hittable>> = self
            .triangles(&material)
            .into_iter()
            .map(|t| Box::new(t) as Box<dyn Hittable>)
            .collect();

        if faces.is_empty() {
            return Box::new(HittableList::new());
        }

        log::debug!(
            "Built mesh: {} positions, {} polygons, {} triangles",
            self.positions.len(),
            self.polygons.len(),
            faces.len()
        );
        Box::new(BvhNode::new(faces, 0.0, 1.0, rng))
    }
}

/// Unit cube centred at the origin.
pub fn cube_mesh(material: Arc<dyn Material>, rng: &mut dyn RngCore) -> Box<dyn Hittable> {
    let mut mesh = MeshBuilder::new();

    let origin = Point3::splat(-0.5);
    let (x, y, z) = (Vec3::X, Vec3::Y, Vec3::Z);
    for offset in [
        Vec3::ZERO,
        x,
        x + z,
        z,
        y,
        y + x,
        y + x + z,
        y + z,
    ] {
        mesh.add_position(origin + offset);
    }

    mesh.add_polygon(&[0, 1, 2, 3]);
    mesh.add_polygon(&[0, 1, 5, 4]);
    mesh.add_polygon(&[2, 3, 7, 6]);
    mesh.add_polygon(&[1, 2, 6, 5]);
    mesh.add_polygon(&[0, 4, 7, 3]);
    mesh.add_polygon(&[7, 6, 5, 4]);

    mesh.build(material, rng)
}

/// UV sphere centred at the origin.
///
/// `segments` is both the number of vertices around each ring and the
/// number of latitude steps from pole to pole (at least 3).
pub fn sphere_mesh(
    material: Arc<dyn Material>,
    radius: f32,
    segments: usize,
    rng: &mut dyn RngCore,
) -> Box<dyn Hittable> {
    let segments = segments.max(3);
    let rings = segments - 2;
    let mut mesh = MeshBuilder::new();

    // Interior rings from top to bottom
    for i in 1..=rings {
        let y = 1.0 - 2.0 * i as f32 / (segments - 1) as f32;
        let ring_radius = (1.0 - y * y).max(0.0).sqrt() * radius;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f32 / segments as f32;
            mesh.add_position(Point3::new(
                ring_radius * phi.sin(),
                y * radius,
                ring_radius * phi.cos(),
            ));
        }
    }
    let top = mesh.add_position(Point3::new(0.0, radius, 0.0));
    let bottom = mesh.add_position(Point3::new(0.0, -radius, 0.0));

    let index = |ring: usize, j: usize| ring * segments + j % segments;

    for ring in 1..rings {
        for j in 0..segments {
            mesh.add_polygon(&[
                index(ring - 1, j),
                index(ring, j),
                index(ring, j + 1),
                index(ring - 1, j + 1),
            ]);
        }
    }
    for j in 0..segments {
        mesh.add_polygon(&[index(0, j), index(0, j + 1), top]);
        mesh.add_polygon(&[index(rings - 1, j), index(rings - 1, j + 1), bottom]);
    }

    mesh.build(material, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::HitRecord;
    use glint_math::{Aabb, Interval, Ray};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    #[test]
    fn test_fan_triangulation() {
        let mut mesh = MeshBuilder::new();
        for i in 0..5 {
            let a = i as f32 * 2.0 * PI / 5.0;
            mesh.add_position(Point3::new(a.cos(), a.sin(), 0.0));
        }
        mesh.add_polygon(&[0, 1, 2, 3, 4]);

        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.triangles(&gray()).len(), 3);
    }

    #[test]
    fn test_degenerate_polygons_are_dropped() {
        let mut mesh = MeshBuilder::new();
        let a = mesh.add_position(Point3::ORIGIN);
        let b = mesh.add_position(Point3::new(1.0, 0.0, 0.0));

        mesh.add_polygon(&[a, b]);
        mesh.add_polygon(&[a, b, 17]);
        // Ending without beginning is a no-op
        mesh.end_polygon();

        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_empty_mesh_builds_empty_list() {
        let mut rng = StdRng::seed_from_u64(0);
        let empty = MeshBuilder::new().build(gray(), &mut rng);

        let zero = Aabb::new(Point3::ORIGIN, Point3::ORIGIN);
        assert_eq!(empty.bounding_box(0.0, 1.0), zero);

        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), -Vec3::Z, 0.0);
        let mut rec = HitRecord::default();
        assert!(!empty.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_cube_mesh_faces() {
        let mut rng = StdRng::seed_from_u64(1);
        let cube = cube_mesh(gray(), &mut rng);

        for axis in [Vec3::X, Vec3::Y, Vec3::Z, -Vec3::X, -Vec3::Y, -Vec3::Z] {
            // Off-centre across the face so the ray avoids the quad diagonals
            let across = Vec3::new(0.05, 0.13, 0.21) * (Vec3::ONE - axis.abs());
            let origin = Point3::from_vec(axis * 3.0 + across);
            let ray = Ray::new(origin, -axis, 0.0);
            let mut rec = HitRecord::default();
            assert!(cube.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!((rec.t - 2.5).abs() < 1e-4, "axis {axis:?} t {}", rec.t);
            assert!((rec.normal - axis).length() < 1e-4);
        }
    }

    #[test]
    fn test_sphere_mesh_approximates_sphere() {
        let mut rng = StdRng::seed_from_u64(2);
        let sphere = sphere_mesh(gray(), 2.0, 32, &mut rng);

        let bbox = sphere.bounding_box(0.0, 1.0);
        assert!((bbox.max.y - 2.0).abs() < 1e-3);
        assert!((bbox.min.y + 2.0).abs() < 1e-3);

        for dir in [Vec3::X, Vec3::Z, Vec3::new(1.0, 1.0, 1.0).normalize()] {
            let ray = Ray::new(Point3::from_vec(dir * 10.0), -dir, 0.0);
            let mut rec = HitRecord::default();
            assert!(sphere.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
            // Inscribed polygons sit slightly inside the true surface
            assert!(rec.t > 7.9 && rec.t < 8.2, "t = {}", rec.t);
        }
    }
}
