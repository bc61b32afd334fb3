//! Angle sweeps: run a state through an element that depends on an angle.

use serde::{Deserialize, Serialize};

use crate::element::OpticalElement;
use crate::polarization::PolarizationState;
use crate::stokes::StokesVector;

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// `n = 1` gives `[start]`; `n = 0` gives an empty vector.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
            values[n - 1] = end;
            values
        }
    }
}

/// Output of one sweep point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSample {
    /// Swept angle (degrees).
    pub angle_deg: f64,
    /// State after the optical system.
    pub state: PolarizationState,
    pub intensity: f64,
    pub stokes: StokesVector,
}

/// For each angle, build the optical system with `system` and pass `input`
/// through it.
pub fn sweep_angles<F>(angles: &[f64], input: &PolarizationState, system: F) -> Vec<SweepSample>
where
    F: Fn(f64) -> OpticalElement,
{
    angles
        .iter()
        .map(|&angle_deg| {
            let state = system(angle_deg).act_on(input);
            SweepSample {
                angle_deg,
                intensity: state.intensity(),
                stokes: state.stokes(),
                state,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let v = linspace(0.0, 360.0, 20);
        assert_eq!(v.len(), 20);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[19], 360.0);
        assert_abs_diff_eq!(v[1], 360.0 / 19.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
    }

    #[test]
    fn test_malus_law_sweep() {
        let angles = linspace(0.0, 180.0, 7);
        let samples = sweep_angles(&angles, &PolarizationState::linear_horizontal(), OpticalElement::polarizer);
        for s in &samples {
            let c = s.angle_deg.to_radians().cos();
            assert_abs_diff_eq!(s.intensity, c * c, epsilon = 1e-12);
            assert_abs_diff_eq!(s.stokes.s0, s.intensity, epsilon = 1e-15);
        }
    }
}
