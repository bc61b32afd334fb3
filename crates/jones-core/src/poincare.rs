//! Point collection for Poincaré-sphere plots.
//!
//! A [`PoincareCanvas`] records where states land on the sphere together with
//! a display style. It owns no rendering: whoever draws the sphere takes the
//! points with [`PoincareCanvas::flush`]. Canvases are ordinary values, so
//! several can coexist and none is created implicitly.

use serde::{Deserialize, Serialize};

use crate::polarization::PolarizationState;

pub const DEFAULT_COLOR: &str = "r";
pub const DEFAULT_SIZE: f64 = 10.0;

/// A single plotted point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoincarePoint {
    /// Cartesian position $(S_1, S_2, S_3)$.
    pub position: [f64; 3],
    pub color: String,
    /// Marker size.
    pub size: f64,
}

/// Accumulates points until flushed or reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoincareCanvas {
    points: Vec<PoincarePoint>,
}

impl PoincareCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `state` at $(S_1, S_2, S_3)$ with the given style.
    ///
    /// Only unit-intensity states land on the unit sphere; others are
    /// recorded as given.
    pub fn plot(&mut self, state: &PolarizationState, color: &str, size: f64) {
        let stokes = state.stokes();
        if (stokes.s0 - 1.0).abs() > 1e-9 {
            log::debug!("Plotting state with S0 = {:.6}, point is off the unit sphere", stokes.s0);
        }
        self.points.push(PoincarePoint {
            position: stokes.poincare_point(),
            color: color.to_string(),
            size,
        });
    }

    /// Record `state` with the default style.
    pub fn plot_default(&mut self, state: &PolarizationState) {
        self.plot(state, DEFAULT_COLOR, DEFAULT_SIZE);
    }

    pub fn points(&self) -> &[PoincarePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hand over all accumulated points, leaving the canvas empty.
    pub fn flush(&mut self) -> Vec<PoincarePoint> {
        std::mem::take(&mut self.points)
    }

    /// Discard all accumulated points.
    pub fn reset(&mut self) {
        self.points.clear();
    }
}
