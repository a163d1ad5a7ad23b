//! Built-in demo scenes.

use glint_core::ImageCache;
use glint_math::sampling::{gen_f32, gen_range};
use glint_renderer::{
    AaRect, BoxShape, BvhNode, Camera, CheckerTexture, Color, Dielectric, DiffuseLight,
    FlipFace, Hittable, HittableList, ImageTexture, Lambertian, Material, Metal, MovingSphere,
    NoiseTexture, Point3, RenderResult, RotateY, Sphere, Translate, Vec3,
};
use rand::RngCore;
use std::path::Path;
use std::sync::Arc;

/// Everything needed to render one of the demo scenes.
pub struct Scene {
    pub name: &'static str,
    pub world: Box<dyn Hittable>,
    /// Emitters to importance sample, if any
    pub lights: Option<Box<dyn Hittable>>,
    pub camera: Camera,
    pub background: Color,
    pub image_width: u32,
    pub samples_per_pixel: u32,
}

impl Scene {
    fn new(name: &'static str, world: Box<dyn Hittable>, camera: Camera) -> Self {
        Self {
            name,
            world,
            lights: None,
            camera,
            background: Color::ZERO,
            image_width: 400,
            samples_per_pixel: 12,
        }
    }

    fn with_lights(mut self, lights: Box<dyn Hittable>) -> Self {
        self.lights = Some(lights);
        self
    }

    fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    fn with_quality(mut self, image_width: u32, samples_per_pixel: u32) -> Self {
        self.image_width = image_width;
        self.samples_per_pixel = samples_per_pixel;
        self
    }
}

pub const SCENE_NAMES: [&str; 6] = [
    "random-spheres",
    "two-spheres",
    "earth",
    "simple-light",
    "cornell-box",
    "lit-spheres",
];

const SKY: Color = Vec3::new(0.7, 0.8, 1.0);
const DIST_TO_FOCUS: f32 = 10.0;

/// Build scene number `index`. Texture files are looked up in `asset_dir`.
pub fn build(index: usize, asset_dir: &Path, rng: &mut dyn RngCore) -> RenderResult<Option<Scene>> {
    let scene = match index {
        0 => random_spheres(rng),
        1 => two_spheres(),
        2 => earth(asset_dir)?,
        3 => simple_light(rng),
        4 => cornell_box(),
        5 => lit_spheres(),
        _ => return Ok(None),
    };
    Ok(Some(scene))
}

fn lambertian(color: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::from_color(color))
}

fn light(strength: f32) -> Arc<dyn Material> {
    Arc::new(DiffuseLight::from_color(Color::splat(strength)))
}

fn checker_ground() -> Arc<dyn Material> {
    Arc::new(Lambertian::new(Arc::new(CheckerTexture::solid(
        1.0,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ))))
}

fn camera(look_from: Point3, look_at: Point3, vfov: f32, aperture: f32) -> Camera {
    Camera::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(vfov, aperture, DIST_TO_FOCUS)
        .with_aspect_ratio(16.0 / 9.0)
        .with_shutter(0.0, 1.0)
}

fn random_color(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

fn random_spheres(rng: &mut dyn RngCore) -> Scene {
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        checker_ground(),
    )));

    let reference = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose = gen_f32(rng);
            let center = Point3::new(
                a as f32 + gen_range(rng, 0.0, 0.9),
                0.2,
                b as f32 + gen_range(rng, 0.0, 0.9),
            );
            if (center - reference).length() <= 0.9 {
                continue;
            }

            if choose < 0.8 {
                let albedo = random_color(rng, 0.0, 1.0) * random_color(rng, 0.0, 1.0);
                let material = lambertian(albedo);
                if choose > 0.7 {
                    let center1 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                    world.add(Box::new(MovingSphere::new(center, center1, 0.0, 1.0, 0.2, material)));
                } else {
                    world.add(Box::new(Sphere::new(center, 0.2, material)));
                }
            } else if choose > 0.95 {
                let albedo = random_color(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.add(Box::new(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz)))));
            } else {
                world.add(Box::new(Sphere::new(center, 0.2, glass.clone())));
            }
        }
    }

    world.add(Box::new(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Box::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.4, 0.2, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    let world = BvhNode::from_list(world, 0.0, 1.0, rng);
    let camera = camera(Point3::new(13.0, 2.0, 3.0), Point3::ORIGIN, 20.0, 0.1);

    Scene::new(SCENE_NAMES[0], Box::new(world), camera)
        .with_background(SKY)
        .with_quality(1200, 32)
}

fn two_spheres() -> Scene {
    let red: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.9, 0.1, 0.1), 0.1));
    let blue: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.1, 0.1, 0.9), 0.1));

    let light_sphere = || Sphere::new(Point3::new(3.0, 25.0, 1.0), 3.0, light(15.0));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, red)));
    world.add(Box::new(Sphere::new(Point3::new(3.0, 1.0, -1.0), 1.0, blue)));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        checker_ground(),
    )));
    world.add(Box::new(light_sphere()));

    let camera = camera(Point3::new(13.0, 7.0, 3.0), Point3::new(0.0, 1.0, 0.0), 30.0, 0.0);

    Scene::new(SCENE_NAMES[1], Box::new(world), camera)
        .with_lights(Box::new(light_sphere()))
        .with_background(Color::splat(0.3))
        .with_quality(640, 128)
}

fn earth(asset_dir: &Path) -> RenderResult<Scene> {
    let mut images = ImageCache::with_base_dir(asset_dir);
    let texture = ImageTexture::new(images.load("earthmap.jpg")?);
    let surface: Arc<dyn Material> = Arc::new(Lambertian::new(Arc::new(texture)));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(Point3::ORIGIN, 2.0, surface)));

    let camera = camera(Point3::new(13.0, 2.0, 3.0), Point3::ORIGIN, 20.0, 0.0);

    Ok(Scene::new(SCENE_NAMES[2], Box::new(world), camera).with_background(SKY))
}

fn simple_light(rng: &mut dyn RngCore) -> Scene {
    let marble: Arc<dyn Material> = Arc::new(Lambertian::new(Arc::new(NoiseTexture::new(4.0, rng))));
    let panel = || AaRect::xy(3.0, 5.0, 1.0, 3.0, -2.0, light(4.0));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        marble.clone(),
    )));
    world.add(Box::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, marble)));
    world.add(Box::new(panel()));

    let camera = camera(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), 20.0, 0.0);

    Scene::new(SCENE_NAMES[3], Box::new(world), camera).with_lights(Box::new(panel()))
}

fn cornell_box() -> Scene {
    let red = lambertian(Color::new(0.65, 0.05, 0.05));
    let white = lambertian(Color::splat(0.73));
    let green = lambertian(Color::new(0.12, 0.45, 0.15));
    let lamp = || AaRect::xz(213.0, 343.0, 227.0, 332.0, 554.0, light(15.0));

    let mut world = HittableList::new();
    world.add(Box::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Box::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Box::new(FlipFace::new(Box::new(lamp()))));
    world.add(Box::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Box::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(Box::new(AaRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));

    let tall = BoxShape::new(Point3::ORIGIN, Point3::new(165.0, 330.0, 165.0), white.clone());
    world.add(Box::new(Translate::new(
        Box::new(RotateY::new(Box::new(tall), 15.0)),
        Vec3::new(265.0, 0.0, 295.0),
    )));

    let short = BoxShape::new(Point3::ORIGIN, Point3::splat(165.0), white);
    world.add(Box::new(Translate::new(
        Box::new(RotateY::new(Box::new(short), -18.0)),
        Vec3::new(130.0, 0.0, 65.0),
    )));

    let camera = camera(
        Point3::new(278.0, 278.0, -800.0),
        Point3::new(278.0, 278.0, 0.0),
        40.0,
        0.0,
    )
    .with_aspect_ratio(1.0);

    Scene::new(SCENE_NAMES[4], Box::new(world), camera)
        .with_lights(Box::new(lamp()))
        .with_quality(500, 10)
}

fn lit_spheres() -> Scene {
    let panel = || AaRect::xz(-1.0, 1.0, -1.0, 1.0, 6.0, light(12.0));

    // A finite floor, so the background shows around it
    let mut world = HittableList::new();
    world.add(Box::new(AaRect::xz(-2.5, 2.5, -2.5, 2.5, 0.0, lambertian(Color::splat(0.5)))));
    world.add(Box::new(Sphere::new(
        Point3::new(-1.1, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.8, 0.1, 0.1)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(1.1, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.1, 0.8, 0.1)),
    )));
    // Faces down towards the spheres
    world.add(Box::new(FlipFace::new(Box::new(panel()))));

    let camera = camera(Point3::new(0.0, 12.0, 12.0), Point3::new(0.0, 0.5, 0.0), 20.0, 0.0)
        .with_aspect_ratio(1.0);

    Scene::new(SCENE_NAMES[5], Box::new(world), camera)
        .with_lights(Box::new(panel()))
        .with_quality(400, 64)
}
