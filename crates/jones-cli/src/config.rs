//! TOML configuration deserialisation for Jones calculus jobs.
//!
//! ```toml
//! [source]
//! state = "linear_horizontal"
//!
//! [[element]]
//! kind = "quarter_wave_plate"
//! angle = 30.0
//!
//! [[element]]
//! kind = "polarizer_vertical"
//!
//! [sweep]
//! element = 0
//! start = 0.0
//! end = 360.0
//! points = 20
//! ```

use anyhow::Context;
use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub source: SourceConfig,
    /// Optical elements in the order the light meets them.
    #[serde(default, rename = "element")]
    pub elements: Vec<ElementConfig>,
    pub sweep: Option<SweepConfig>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Named polarization states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedState {
    LinearHorizontal,
    LinearVertical,
    LinearDiagonal,
    LinearAntidiagonal,
    /// Linear at `angle` degrees.
    Linear,
    CircularRight,
    CircularLeft,
}

/// The input light: a named state or raw components.
#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    pub state: Option<NamedState>,
    /// Angle (degrees) for `state = "linear"`.
    #[serde(default)]
    pub angle: f64,
    /// Raw `[ex, ey]`; entries are numbers, `"a+bi"` strings or `{ re, im }`.
    pub components: Option<toml::Value>,
    #[serde(default = "default_true")]
    pub normalize: bool,
    #[serde(default = "default_true")]
    pub canonical: bool,
}

/// Named optical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Identity,
    PolarizerHorizontal,
    PolarizerVertical,
    Polarizer,
    QuarterWavePlate,
    HalfWavePlate,
    PhaseRetarder,
    /// Raw Jones matrix given by `matrix`.
    Matrix,
}

/// A single optical element in the beam path.
#[derive(Debug, Deserialize)]
pub struct ElementConfig {
    pub kind: ElementKind,
    /// Axis angle (degrees) from horizontal.
    #[serde(default)]
    pub angle: f64,
    /// Retardance (degrees) for `phase_retarder`.
    #[serde(default)]
    pub eta: f64,
    /// Raw `[[m00, m01], [m10, m11]]` for `kind = "matrix"`.
    pub matrix: Option<toml::Value>,
}

/// Which element parameter a sweep varies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    #[default]
    Angle,
    Eta,
}

/// Sweep one parameter of one element across a range.
#[derive(Debug, Deserialize)]
pub struct SweepConfig {
    /// Index into the element list.
    pub element: usize,
    #[serde(default)]
    pub parameter: SweepParameter,
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_sweep_end")]
    pub end: f64,
    #[serde(default = "default_sweep_points")]
    pub points: usize,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save sweeps as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_csv: bool,
    /// Whether to also save sweeps as JSON (default: false). `run` always writes `result.json`.
    #[serde(default)]
    pub save_json: bool,
    /// Marker colour for Poincaré points.
    #[serde(default = "default_color")]
    pub color: String,
    /// Marker size for Poincaré points.
    #[serde(default = "default_size")]
    pub size: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_csv: true,
            save_json: false,
            color: default_color(),
            size: default_size(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_sweep_end() -> f64 {
    360.0
}
fn default_sweep_points() -> usize {
    50
}
fn default_output_dir() -> String {
    "./output".into()
}
fn default_color() -> String {
    jones_core::poincare::DEFAULT_COLOR.into()
}
fn default_size() -> f64 {
    jones_core::poincare::DEFAULT_SIZE
}

/// Parse a TOML job configuration.
pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    if config.source.state.is_none() && config.source.components.is_none() {
        anyhow::bail!("[source] needs either `state` or `components`");
    }
    if let Some(sweep) = &config.sweep {
        if sweep.element >= config.elements.len() {
            anyhow::bail!(
                "[sweep] element index {} is out of range ({} elements configured)",
                sweep.element,
                config.elements.len()
            );
        }
    }
    Ok(config)
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid configuration {}", path.display()))
}
