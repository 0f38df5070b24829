// src/config.rs

//! Defines the scene configuration structures for `procimg`.
//!
//! A scene describes a canvas, the color generator bound to it, and an
//! ordered list of steps to apply before finalizing. Scenes can be
//! deserialized from JSON so new images can be produced without writing Rust.
//!
//! Every struct carries `#[serde(default)]`, so a scene file only needs to
//! name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::{RGB_MAX, RGB_MIN};

// --- Top-Level Configuration Structure ---

/// A complete scene: canvas dimensions, color policy and drawing steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Seed for every randomized step. `None` draws from system entropy.
    pub seed: Option<u64>,
    /// Color generator settings.
    pub generator: GeneratorConfig,
    /// Drawing steps, applied in order.
    pub steps: Vec<Step>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            width: 1920,
            height: 1080,
            seed: None,
            generator: GeneratorConfig::default(),
            steps: Vec::new(),
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse scene file {}", path.display()))
    }
}

// --- Color Generator Configuration ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Always black.
    #[default]
    Constant,
    /// Circular traversal of a color pool.
    Ring,
}

/// Settings for the scene's color generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub kind: GeneratorKind,
    /// Lower clamp for every generated channel.
    pub rgb_rel_min: i64,
    /// Upper clamp for every generated channel.
    pub rgb_rel_max: i64,
    /// Starting ring index (ring only).
    pub initial_ring_index: usize,
    /// Six-digit hex colors added once each (ring only).
    pub colors: Vec<String>,
    /// Palette URLs whose colors are each added six times (ring only).
    pub palettes: Vec<String>,
    /// If set, a rainbow with this step size is added (ring only).
    pub rainbow_step: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            kind: GeneratorKind::Constant,
            rgb_rel_min: RGB_MIN,
            rgb_rel_max: RGB_MAX,
            initial_ring_index: 0,
            colors: Vec::new(),
            palettes: Vec::new(),
            rainbow_step: None,
        }
    }
}

// --- Drawing Steps ---

/// Background fill choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    White,
    Black,
    /// Any six-digit hex color, used as-is (not clamped by the generator).
    Hex(String),
    /// The next color from the scene's generator.
    Generated,
}

/// A single-variable function in mathematical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FunctionSpec {
    /// `y = slope * x + intercept`
    Linear { slope: f64, intercept: f64 },
    /// `y = amplitude * sin(x / period) + offset`
    Sine {
        amplitude: f64,
        period: f64,
        offset: f64,
    },
}

impl FunctionSpec {
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            FunctionSpec::Linear { slope, intercept } => slope * x + intercept,
            FunctionSpec::Sine {
                amplitude,
                period,
                offset,
            } => amplitude * (x / period).sin() + offset,
        }
    }
}

fn default_brush() -> usize {
    1
}

fn default_step() -> usize {
    1
}

fn default_partitions() -> usize {
    1
}

/// One canvas mutation. Serialized with an `"op"` tag, e.g.
/// `{"op": "divide_regions", "times": 35}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Background {
        color: Background,
    },
    DivideRegions {
        times: usize,
    },
    ReserveRegions,
    Plot {
        function: FunctionSpec,
        #[serde(default = "default_brush")]
        brush_size: usize,
        /// Optional hex color shared by every stamp of this plot.
        #[serde(default)]
        color: Option<String>,
    },
    RandomDots {
        count: usize,
    },
    ConnectDots {
        #[serde(default = "default_brush")]
        brush_size: usize,
    },
    RandomSlices {
        x_min: i64,
        x_max: i64,
        #[serde(default = "default_step")]
        x_step: usize,
    },
    SymmetricSlices {
        x_min: i64,
        x_max: i64,
        #[serde(default = "default_step")]
        x_step: usize,
        #[serde(default = "default_partitions")]
        num_partitions: usize,
    },
    ReserveSlices,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SceneConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.generator.kind, GeneratorKind::Constant);
    }

    #[test]
    fn parses_steps_and_generator() {
        let json = r#"{
            "width": 64,
            "height": 32,
            "seed": 7,
            "generator": {
                "kind": "ring",
                "palettes": ["https://coolors.co/ff4800-ff5400"],
                "rainbow_step": 30
            },
            "steps": [
                {"op": "background", "color": "white"},
                {"op": "background", "color": {"hex": "102030"}},
                {"op": "background", "color": "generated"},
                {"op": "divide_regions", "times": 5},
                {"op": "reserve_regions"},
                {"op": "plot", "function": {"kind": "sine", "amplitude": 10, "period": 5, "offset": 16}, "brush_size": 2},
                {"op": "symmetric_slices", "x_min": 0, "x_max": 64, "num_partitions": 3}
            ]
        }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.generator.kind, GeneratorKind::Ring);
        assert_eq!(config.generator.rgb_rel_max, 255);
        assert_eq!(config.generator.rainbow_step, Some(30));
        assert_eq!(config.steps.len(), 7);
        assert_eq!(
            config.steps[1],
            Step::Background {
                color: Background::Hex("102030".to_string())
            }
        );
        assert_eq!(
            config.steps[2],
            Step::Background {
                color: Background::Generated
            }
        );
        assert_eq!(
            config.steps[6],
            Step::SymmetricSlices {
                x_min: 0,
                x_max: 64,
                x_step: 1,
                num_partitions: 3
            }
        );
    }

    #[test]
    fn unknown_step_is_rejected() {
        let json = r#"{"steps": [{"op": "explode"}]}"#;
        assert!(SceneConfig::from_json_str(json).is_err());
    }

    #[test]
    fn function_specs_evaluate() {
        let linear = FunctionSpec::Linear {
            slope: 1.0,
            intercept: 50.0,
        };
        assert_eq!(linear.eval(10.0), 60.0);
        let sine = FunctionSpec::Sine {
            amplitude: 200.0,
            period: 100.0,
            offset: 540.0,
        };
        assert_eq!(sine.eval(0.0), 540.0);
    }
}
