// src/main.rs

use std::path::Path;

use anyhow::Context;
use log::{error, info};

use procimg::config::SceneConfig;
use procimg::scene;

const DEFAULT_SCENE: &str = "regions";
const DEFAULT_OUTPUT: &str = "out.rgb";
const DEFAULT_WIDTH: usize = 1920;
const DEFAULT_HEIGHT: usize = 1080;

/// Resolves the scene argument: a preset name, or otherwise a JSON file path.
fn load_scene(arg: &str) -> anyhow::Result<SceneConfig> {
    if scene::PRESET_NAMES.contains(&arg) {
        info!("Using preset scene '{}'", arg);
        return Ok(scene::preset(arg, DEFAULT_WIDTH, DEFAULT_HEIGHT)?);
    }
    if !Path::new(arg).exists() {
        anyhow::bail!(
            "'{}' is neither a preset ({}) nor an existing scene file",
            arg,
            scene::PRESET_NAMES.join(", ")
        );
    }
    info!("Loading scene file {}", arg);
    SceneConfig::load(arg)
}

/// Entry point: `procimg [SCENE] [OUTPUT]`.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let mut args = std::env::args().skip(1);
    let scene_arg = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let output = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let config = load_scene(&scene_arg).context("Failed to resolve scene")?;

    let buffer = match scene::render(&config) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("Rendering failed: {}", e);
            return Err(e).context("Failed to render scene");
        }
    };

    std::fs::write(&output, &buffer)
        .with_context(|| format!("Failed to write image buffer to {}", output))?;
    info!(
        "Wrote {} bytes of raw RGB ({}x{}, 8 bits per channel, no padding) to {}",
        buffer.len(),
        config.width,
        config.height,
        output
    );

    Ok(())
}
