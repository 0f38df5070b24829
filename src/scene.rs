// src/scene.rs

//! Runs a `SceneConfig` against a `Canvas`, plus the built-in preset scenes.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::{ChannelRange, Color};
use crate::config::{
    Background, FunctionSpec, GeneratorConfig, GeneratorKind, SceneConfig, Step,
};
use crate::error::{CanvasError, Result};
use crate::generator::ColorGenerator;

pub const REDS: &str =
    "https://coolors.co/641220-6e1423-85182a-a11d33-a71e34-b21e35-bd1f36-c71f37-da1e37-e01e37";
pub const YELLOWS: &str =
    "https://coolors.co/007f5f-2b9348-55a630-80b918-aacc00-bfd200-d4d700-dddf00-eeef20-ffff3f";
pub const ORANGES: &str =
    "https://coolors.co/ff4800-ff5400-ff6000-ff6d00-ff7900-ff8500-ff9100-ff9e00-ffaa00-ffb600";
pub const BLUES: &str =
    "https://coolors.co/03045e-023e8a-0077b6-0096c7-00b4d8-48cae4-90e0ef-ade8f4-caf0f8";
pub const PURPLES: &str =
    "https://coolors.co/10002b-240046-3c096c-5a189a-7b2cbf-9d4edd-c77dff-e0aaff";
pub const GREENS: &str =
    "https://coolors.co/d8f3dc-b7e4c7-95d5b2-74c69d-52b788-40916c-2d6a4f-1b4332-081c15";

/// Names accepted by `preset`.
pub const PRESET_NAMES: &[&str] = &[
    "plots",
    "rainbow-plots",
    "regions",
    "random-slices",
    "symmetric-slices",
    "waves",
];

// Vertical spacing between the stacked sine plots of the "waves" preset.
const WAVE_SPACING: usize = 200;

/// Builds the generator described by `config`, populating a ring pool from
/// its colors, palettes and rainbow in that order.
pub fn build_generator(config: &GeneratorConfig) -> Result<ColorGenerator> {
    let range = ChannelRange::new(config.rgb_rel_min, config.rgb_rel_max);
    match config.kind {
        GeneratorKind::Constant => Ok(ColorGenerator::constant(range)),
        GeneratorKind::Ring => {
            let mut generator = ColorGenerator::ring(range, config.initial_ring_index);
            for hex in &config.colors {
                generator.add_color_from_hex(hex, 1)?;
            }
            for url in &config.palettes {
                generator.add_palette_from_url(url)?;
            }
            if let Some(step) = config.rainbow_step {
                generator.add_rainbow(step)?;
            }
            debug!("Ring generator pool holds {} colors", generator.pool().len());
            Ok(generator)
        }
    }
}

fn parse_optional_hex(hex: Option<&str>) -> Result<Option<Color>> {
    hex.map(Color::from_hex).transpose()
}

/// Applies one step to the canvas.
pub fn apply_step<R: Rng>(canvas: &mut Canvas<R>, step: &Step) -> Result<()> {
    match step {
        Step::Background { color } => match color {
            Background::White => canvas.reserve_white_background(),
            Background::Black => canvas.reserve_black_background(),
            Background::Hex(hex) => canvas.reserve_background(Color::from_hex(hex)?),
            Background::Generated => {
                let color = canvas.generator_mut().generate_color()?;
                canvas.reserve_background(color);
            }
        },
        Step::DivideRegions { times } => {
            let splits = (0..*times)
                .filter(|_| canvas.divide_random_region_in_two())
                .count();
            debug!("{} of {} region divisions succeeded", splits, times);
        }
        Step::ReserveRegions => canvas.reserve_all_regions()?,
        Step::Plot {
            function,
            brush_size,
            color,
        } => {
            let color = parse_optional_hex(color.as_deref())?;
            let function: FunctionSpec = *function;
            canvas.draw_function(|x| function.eval(x), *brush_size, color)?;
        }
        Step::RandomDots { count } => {
            for _ in 0..*count {
                canvas.add_random_dot();
            }
        }
        Step::ConnectDots { brush_size } => canvas.connect_all_dots(*brush_size)?,
        Step::RandomSlices {
            x_min,
            x_max,
            x_step,
        } => canvas.create_random_slices(*x_min, *x_max, *x_step)?,
        Step::SymmetricSlices {
            x_min,
            x_max,
            x_step,
            num_partitions,
        } => {
            canvas.create_symmetric_slices_from_center(*x_min, *x_max, *x_step, *num_partitions)?
        }
        Step::ReserveSlices => canvas.reserve_all_slices()?,
    }
    Ok(())
}

/// Builds the canvas for `config` and applies every step, without finalizing.
pub fn build(config: &SceneConfig) -> Result<Canvas<StdRng>> {
    let generator = build_generator(&config.generator)?;
    let mut canvas = match config.seed {
        Some(seed) => Canvas::seeded(config.width, config.height, generator, seed)?,
        None => Canvas::new(config.width, config.height, generator)?,
    };
    for (i, step) in config.steps.iter().enumerate() {
        debug!("Applying step {}: {:?}", i, step);
        apply_step(&mut canvas, step)?;
    }
    Ok(canvas)
}

/// Builds and finalizes a scene into its raw RGB buffer.
pub fn render(config: &SceneConfig) -> Result<Vec<u8>> {
    let canvas = build(config)?;
    info!(
        "Rendering {}x{} scene with {} steps",
        config.width,
        config.height,
        config.steps.len()
    );
    canvas.finalize()
}

fn ring(palettes: &[&str], rainbow_step: Option<usize>) -> GeneratorConfig {
    GeneratorConfig {
        kind: GeneratorKind::Ring,
        palettes: palettes.iter().map(|p| p.to_string()).collect(),
        rainbow_step,
        ..GeneratorConfig::default()
    }
}

fn plot_steps(height: usize) -> Vec<Step> {
    vec![
        Step::Background {
            color: Background::White,
        },
        Step::Plot {
            function: FunctionSpec::Linear {
                slope: 1.0,
                intercept: 50.0,
            },
            brush_size: 3,
            color: None,
        },
        Step::Plot {
            function: FunctionSpec::Sine {
                amplitude: 200.0,
                period: 100.0,
                offset: height as f64 / 2.0,
            },
            brush_size: 20,
            color: None,
        },
    ]
}

/// A built-in scene by name, at the given dimensions. See `PRESET_NAMES`.
pub fn preset(name: &str, width: usize, height: usize) -> Result<SceneConfig> {
    let (generator, steps) = match name {
        "plots" => (GeneratorConfig::default(), plot_steps(height)),
        "rainbow-plots" => (ring(&[], Some(30)), plot_steps(height)),
        "regions" => (
            ring(&[ORANGES], None),
            vec![
                Step::Background {
                    color: Background::White,
                },
                Step::DivideRegions { times: 35 },
                Step::ReserveRegions,
            ],
        ),
        "random-slices" => (
            ring(&[REDS, YELLOWS, ORANGES, BLUES], None),
            vec![
                Step::Background {
                    color: Background::Black,
                },
                Step::RandomSlices {
                    x_min: 0,
                    x_max: width as i64,
                    x_step: 9,
                },
                Step::ReserveSlices,
            ],
        ),
        "symmetric-slices" => (
            ring(&[PURPLES, YELLOWS, ORANGES, BLUES, GREENS], None),
            vec![
                Step::Background {
                    color: Background::Black,
                },
                Step::SymmetricSlices {
                    x_min: 0,
                    x_max: width as i64,
                    x_step: 8,
                    num_partitions: 10,
                },
                Step::ReserveSlices,
            ],
        ),
        "waves" => {
            let mut steps = vec![Step::Background {
                color: Background::Generated,
            }];
            steps.extend((0..height).step_by(WAVE_SPACING).map(|offset| Step::Plot {
                function: FunctionSpec::Sine {
                    amplitude: 100.0,
                    period: 100.0,
                    offset: offset as f64,
                },
                brush_size: 40,
                color: None,
            }));
            (ring(&[REDS], None), steps)
        }
        other => {
            return Err(CanvasError::InvalidArgument(format!(
                "unknown preset '{}' (expected one of: {})",
                other,
                PRESET_NAMES.join(", ")
            )))
        }
    };

    Ok(SceneConfig {
        width,
        height,
        seed: None,
        generator,
        steps,
    })
}
