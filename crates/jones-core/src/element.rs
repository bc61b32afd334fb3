//! Jones matrices: linear optical elements acting on polarization states.
//!
//! An element is a 2x2 complex matrix $M$. Acting on a state gives $M\mathbf{v}$;
//! composing two elements gives the matrix product. Neither operation touches
//! its operands.
//!
//! All angles are in degrees and measured from the horizontal axis.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

use crate::error::JonesError;
use crate::polarization::{BuildOptions, PolarizationState};

/// Row-major 2x2 complex matrix.
pub type JonesMatrix = [[Complex64; 2]; 2];

/// A linear optical element described by its Jones matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpticalElement {
    matrix: JonesMatrix,
}

impl OpticalElement {
    pub fn new(matrix: JonesMatrix) -> Self {
        Self { matrix }
    }

    /// Build from a real-valued matrix.
    pub fn from_real(matrix: [[f64; 2]; 2]) -> Self {
        Self::new(matrix.map(|row| row.map(Complex64::from)))
    }

    /// Build from nested rows, which must form exactly 2 rows of 2 entries.
    pub fn from_rows<R: AsRef<[Complex64]>>(rows: &[R]) -> Result<Self, JonesError> {
        match rows {
            [r0, r1] => match (r0.as_ref(), r1.as_ref()) {
                ([a, b], [c, d]) => Ok(Self::new([[*a, *b], [*c, *d]])),
                _ => Err(JonesError::shape(&[r0.as_ref().len(), r1.as_ref().len()])),
            },
            _ => Err(JonesError::shape(
                &rows.iter().map(|r| r.as_ref().len()).collect::<Vec<_>>(),
            )),
        }
    }

    /// Build from a 2-D array, which must have shape (2, 2).
    pub fn from_array(array: &Array2<Complex64>) -> Result<Self, JonesError> {
        match array.dim() {
            (2, 2) => Ok(Self::new([
                [array[[0, 0]], array[[0, 1]]],
                [array[[1, 0]], array[[1, 1]]],
            ])),
            (rows, cols) => Err(JonesError::shape(&vec![cols; rows])),
        }
    }

    /// The element that leaves every state unchanged.
    pub fn identity() -> Self {
        Self::from_real([[1.0, 0.0], [0.0, 1.0]])
    }

    /// Linear polarizer transmitting horizontal light.
    pub fn polarizer_horizontal() -> Self {
        Self::from_real([[1.0, 0.0], [0.0, 0.0]])
    }

    /// Linear polarizer transmitting vertical light.
    pub fn polarizer_vertical() -> Self {
        Self::from_real([[0.0, 0.0], [0.0, 1.0]])
    }

    /// Linear polarizer with its transmission axis at `angle_deg`.
    pub fn polarizer(angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Self::from_real([[c * c, s * c], [s * c, s * s]])
    }

    /// Quarter-wave plate with its fast axis at `angle_deg`.
    ///
    /// $e^{i\pi/4}\begin{pmatrix}\cos^2\theta + i\sin^2\theta & (1-i)\sin\theta\cos\theta \\
    /// (1-i)\sin\theta\cos\theta & \sin^2\theta + i\cos^2\theta\end{pmatrix}$
    pub fn quarter_wave_plate(angle_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let i = Complex64::i();
        let one = Complex64::from(1.0);
        let off = (one - i) * s * c;
        let matrix = [
            [c * c + i * (s * s), off],
            [off, s * s + i * (c * c)],
        ];
        Self::new(matrix).scaled(Complex64::from_polar(1.0, FRAC_PI_4))
    }

    /// Half-wave plate with its fast axis at `angle_deg`.
    pub fn half_wave_plate(angle_deg: f64) -> Self {
        let (s2, c2) = (2.0 * angle_deg.to_radians()).sin_cos();
        Self::from_real([[c2, s2], [s2, -c2]])
    }

    /// General linear retarder: fast axis at `angle_deg`, retardance `eta_deg`.
    ///
    /// $e^{-i\eta/2}\begin{pmatrix}\cos^2\theta + e^{i\eta}\sin^2\theta & (1-e^{i\eta})\sin\theta\cos\theta \\
    /// (1-e^{i\eta})\sin\theta\cos\theta & \sin^2\theta + e^{i\eta}\cos^2\theta\end{pmatrix}$
    pub fn phase_retarder(angle_deg: f64, eta_deg: f64) -> Self {
        let (s, c) = angle_deg.to_radians().sin_cos();
        let eta = eta_deg.to_radians();
        let phase = Complex64::from_polar(1.0, eta);
        let off = (Complex64::from(1.0) - phase) * s * c;
        let matrix = [
            [phase * (s * s) + c * c, off],
            [off, phase * (c * c) + s * s],
        ];
        Self::new(matrix).scaled(Complex64::from_polar(1.0, -eta / 2.0))
    }

    pub fn matrix(&self) -> &JonesMatrix {
        &self.matrix
    }

    /// Matrix entry at (`row`, `col`).
    pub fn entry(&self, row: usize, col: usize) -> Result<Complex64, JonesError> {
        self.matrix
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(JonesError::IndexOutOfRange { index: row.max(col) })
    }

    pub fn to_array(&self) -> Array2<Complex64> {
        Array2::from_shape_fn((2, 2), |(r, c)| self.matrix[r][c])
    }

    /// Pass `state` through this element: $M\mathbf{v}$.
    ///
    /// The product is kept raw (neither normalized nor canonicalized) so that
    /// attenuation by non-unitary elements shows up in the intensity.
    pub fn act_on(&self, state: &PolarizationState) -> PolarizationState {
        let [ex, ey] = state.components();
        let m = &self.matrix;
        PolarizationState::with_options(
            m[0][0] * ex + m[0][1] * ey,
            m[1][0] * ex + m[1][1] * ey,
            BuildOptions::RAW,
        )
    }

    /// Matrix product `self · other`: light passes `other` first, then `self`.
    pub fn compose(&self, other: &OpticalElement) -> OpticalElement {
        let a = &self.matrix;
        let b = &other.matrix;
        let mut product = [[Complex64::new(0.0, 0.0); 2]; 2];
        for (r, row) in product.iter_mut().enumerate() {
            for (c, entry) in row.iter_mut().enumerate() {
                *entry = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        OpticalElement::new(product)
    }

    /// Light passes `self` first, then `next`.
    pub fn then(&self, next: &OpticalElement) -> OpticalElement {
        next.compose(self)
    }

    /// Collapse a chain listed in the order light meets it into one element.
    pub fn chain<'a>(elements: impl IntoIterator<Item = &'a OpticalElement>) -> OpticalElement {
        elements
            .into_iter()
            .fold(OpticalElement::identity(), |acc, e| acc.then(e))
    }

    fn scaled(self, factor: Complex64) -> Self {
        Self::new(self.matrix.map(|row| row.map(|z| z * factor)))
    }
}

impl TryFrom<&Array2<Complex64>> for OpticalElement {
    type Error = JonesError;

    fn try_from(array: &Array2<Complex64>) -> Result<Self, Self::Error> {
        Self::from_array(array)
    }
}
