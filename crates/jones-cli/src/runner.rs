//! Job runner: builds the source state and element chain, propagates light
//! through it, and writes results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use jones_core::input::{element_from_value, state_from_value};
use jones_core::poincare::{PoincareCanvas, PoincarePoint};
use jones_core::repr::format_complex;
use jones_core::sweep::{linspace, sweep_angles, SweepSample};
use jones_core::{BuildOptions, OpticalElement, PolarizationState, StokesVector};

use crate::config::{
    ElementConfig, ElementKind, JobConfig, NamedState, SourceConfig, SweepConfig, SweepParameter,
};

/// Result of propagating the source through the full element chain.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub input: PolarizationState,
    pub system: OpticalElement,
    pub output: PolarizationState,
    pub intensity: f64,
    pub stokes: StokesVector,
}

/// Result of a parameter sweep.
#[derive(Debug, Serialize)]
pub struct SweepOutput {
    pub parameter: &'static str,
    pub samples: Vec<SweepSample>,
    pub poincare: Vec<PoincarePoint>,
}

/// Build the input state from the `[source]` table.
pub fn build_source(source: &SourceConfig) -> Result<PolarizationState> {
    if let Some(components) = &source.components {
        let value = serde_json::to_value(components)?;
        let options = BuildOptions {
            normalize: source.normalize,
            canonical: source.canonical,
        };
        return state_from_value(&value, options).context("Invalid [source] components");
    }

    let state = match source.state {
        Some(NamedState::LinearHorizontal) => PolarizationState::linear_horizontal(),
        Some(NamedState::LinearVertical) => PolarizationState::linear_vertical(),
        Some(NamedState::LinearDiagonal) => PolarizationState::linear_diagonal(),
        Some(NamedState::LinearAntidiagonal) => PolarizationState::linear_antidiagonal(),
        Some(NamedState::Linear) => PolarizationState::linear(source.angle),
        Some(NamedState::CircularRight) => PolarizationState::circular_right(),
        Some(NamedState::CircularLeft) => PolarizationState::circular_left(),
        None => anyhow::bail!("[source] needs either `state` or `components`"),
    };
    Ok(state)
}

/// Constructor for a named element from `(angle, eta)`; `None` for raw matrices.
fn element_builder(kind: ElementKind) -> Option<fn(f64, f64) -> OpticalElement> {
    let build: fn(f64, f64) -> OpticalElement = match kind {
        ElementKind::Identity => |_, _| OpticalElement::identity(),
        ElementKind::PolarizerHorizontal => |_, _| OpticalElement::polarizer_horizontal(),
        ElementKind::PolarizerVertical => |_, _| OpticalElement::polarizer_vertical(),
        ElementKind::Polarizer => |angle, _| OpticalElement::polarizer(angle),
        ElementKind::QuarterWavePlate => |angle, _| OpticalElement::quarter_wave_plate(angle),
        ElementKind::HalfWavePlate => |angle, _| OpticalElement::half_wave_plate(angle),
        ElementKind::PhaseRetarder => OpticalElement::phase_retarder,
        ElementKind::Matrix => return None,
    };
    Some(build)
}

/// Build one element from its configuration.
pub fn build_element(element: &ElementConfig) -> Result<OpticalElement> {
    if let Some(build) = element_builder(element.kind) {
        return Ok(build(element.angle, element.eta));
    }
    let matrix = element
        .matrix
        .as_ref()
        .context("kind = \"matrix\" requires a `matrix` entry")?;
    let value = serde_json::to_value(matrix)?;
    element_from_value(&value).context("Invalid element matrix")
}

/// Build every configured element with its configured parameters.
pub fn build_elements(job: &JobConfig) -> Result<Vec<OpticalElement>> {
    job.elements
        .iter()
        .enumerate()
        .map(|(i, e)| {
            build_element(e).with_context(|| format!("Element {} ({:?})", i, e.kind))
        })
        .collect()
}

/// Propagate the source through the element chain.
pub fn run_job(job: &JobConfig) -> Result<RunOutput> {
    let input = build_source(&job.source)?;
    let elements = build_elements(job)?;
    log::info!("Propagating {} through {} element(s)", input, elements.len());

    let system = OpticalElement::chain(&elements);
    let output = system.act_on(&input);

    println!("  Input:     {}", input);
    println!("  System:    {}", system);
    println!("  Output:    {}", output);
    println!("  Intensity: {:.12}", output.intensity());

    Ok(RunOutput {
        input,
        system,
        intensity: output.intensity(),
        stokes: output.stokes(),
        output,
    })
}

/// Sweep one element parameter and collect intensities and Poincaré points.
pub fn run_sweep(job: &JobConfig) -> Result<SweepOutput> {
    let sweep: &SweepConfig = job
        .sweep
        .as_ref()
        .context("No [sweep] table in configuration")?;
    let target = job
        .elements
        .get(sweep.element)
        .with_context(|| format!("Sweep element index {} is out of range", sweep.element))?;
    let Some(build) = element_builder(target.kind) else {
        anyhow::bail!("Element {} is a raw matrix and has no parameter to sweep", sweep.element);
    };

    let input = build_source(&job.source)?;
    let elements = build_elements(job)?;
    let before = OpticalElement::chain(&elements[..sweep.element]);
    let after = OpticalElement::chain(&elements[sweep.element + 1..]);

    let values = linspace(sweep.start, sweep.end, sweep.points);
    log::info!(
        "Sweeping {:?} of element {} over {} points in [{}, {}]",
        sweep.parameter,
        sweep.element,
        values.len(),
        sweep.start,
        sweep.end
    );

    let (angle, eta) = (target.angle, target.eta);
    let parameter = sweep.parameter;
    let samples = sweep_angles(&values, &input, |value| {
        let (a, e) = match parameter {
            SweepParameter::Angle => (value, eta),
            SweepParameter::Eta => (angle, value),
        };
        before.then(&build(a, e)).then(&after)
    });

    let mut canvas = PoincareCanvas::new();
    for sample in &samples {
        canvas.plot(&sample.state, &job.output.color, job.output.size);
    }

    Ok(SweepOutput {
        parameter: match sweep.parameter {
            SweepParameter::Angle => "angle_deg",
            SweepParameter::Eta => "eta_deg",
        },
        samples,
        poincare: canvas.flush(),
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

/// Write any serialisable result as pretty JSON.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("JSON written to: {}", path.display());
    Ok(())
}

/// Write the result of `run` as `result.json` under `out_dir`.
pub fn write_run_result(result: &RunOutput, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join("result.json");
    write_json(result, &path)?;
    Ok(path)
}

/// Write sweep samples to a CSV file with a metadata header.
pub fn write_sweep_csv(sweep: &SweepOutput, path: &Path, job: &JobConfig) -> Result<()> {
    use std::io::Write;

    ensure_parent(path)?;
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Jones calculus sweep")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    for (i, e) in job.elements.iter().enumerate() {
        writeln!(file, "# element {}: {:?}, angle={} deg, eta={} deg", i, e.kind, e.angle, e.eta)?;
    }
    writeln!(file, "#")?;
    writeln!(file, "{},ex,ey,intensity,s0,s1,s2,s3", sweep.parameter)?;

    for s in &sweep.samples {
        writeln!(
            file,
            "{:.6},{},{},{:.12e},{:.12e},{:.12e},{:.12e},{:.12e}",
            s.angle_deg,
            format_complex(s.state.ex()),
            format_complex(s.state.ey()),
            s.intensity,
            s.stokes.s0,
            s.stokes.s1,
            s.stokes.s2,
            s.stokes.s3,
        )?;
    }

    println!("Sweep written to: {}", path.display());
    Ok(())
}

/// Write Poincaré-sphere points as CSV for an external plotter.
pub fn write_poincare_csv(points: &[PoincarePoint], path: &Path) -> Result<()> {
    use std::io::Write;

    ensure_parent(path)?;
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "s1,s2,s3,color,size")?;
    for p in points {
        writeln!(
            file,
            "{:.12e},{:.12e},{:.12e},{},{}",
            p.position[0], p.position[1], p.position[2], p.color, p.size
        )?;
    }

    println!("Poincaré points written to: {}", path.display());
    Ok(())
}
