//! Glint - render one of the built-in scenes to an image file.

mod scenes;

use anyhow::{bail, Context, Result};
use clap::Parser;
use glint_renderer::{render, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Offline Monte Carlo path tracer")]
struct Args {
    /// Scene to render (0 random spheres, 1 two spheres, 2 earth,
    /// 3 simple light, 4 Cornell box, 5 lit spheres)
    #[arg(short, long, default_value_t = 0)]
    scene: usize,

    /// Image width in pixels
    #[arg(short, long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum bounce depth
    #[arg(long)]
    depth: Option<u32>,

    /// Random seed for scene generation and sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Write hit coverage to the alpha channel
    #[arg(long)]
    transparent: bool,

    /// JSON file with render settings to override
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding texture files
    #[arg(long, default_value = ".")]
    assets: PathBuf,
}

/// Apply the keys present in a JSON object on top of `base`.
fn merge_config(base: &RenderConfig, json: &str) -> Result<RenderConfig> {
    let overrides: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Object(overrides) = overrides else {
        bail!("render settings must be a JSON object");
    };

    let mut merged = serde_json::to_value(base)?;
    if let serde_json::Value::Object(fields) = &mut merged {
        fields.extend(overrides);
    }
    Ok(serde_json::from_value(merged)?)
}

fn load_config(base: RenderConfig, path: &Path) -> Result<RenderConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read render settings {}", path.display()))?;
    let config = merge_config(&base, &json)
        .with_context(|| format!("invalid render settings in {}", path.display()))?;
    log::info!("Loaded render settings from {}", path.display());
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = RenderConfig::default();
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let scene = scenes::build(args.scene, &args.assets, &mut rng)
        .with_context(|| format!("failed to build scene {}", args.scene))?
        .with_context(|| {
            format!(
                "unknown scene {}, expected 0..={}",
                args.scene,
                scenes::SCENE_NAMES.len() - 1
            )
        })?;
    log::info!("Scene {} ({})", args.scene, scene.name);

    // Scene defaults, then the settings file, then explicit flags
    config.image_width = scene.image_width;
    config.samples_per_pixel = scene.samples_per_pixel;
    config.background = scene.background;
    if let Some(path) = &args.config {
        config = load_config(config, path)?;
    }
    if let Some(width) = args.width {
        config.image_width = width;
    }
    if let Some(samples) = args.samples {
        config.samples_per_pixel = samples;
    }
    if let Some(depth) = args.depth {
        config.max_depth = depth;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    config.transparent_background |= args.transparent;

    let image = render(&scene.camera, scene.world.as_ref(), scene.lights.as_deref(), &config)
        .context("render failed")?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
