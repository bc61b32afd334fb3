//! Jones vectors: the polarization state of fully polarized light.
//!
//! A state is the pair of complex field amplitudes $(E_x, E_y)$. Construction
//! runs up to three steps, always in this order:
//!
//! 1. **Normalize** to unit intensity $|E_x|^2 + |E_y|^2 = 1$.
//! 2. **Canonicalize** to normal form: $E_x' = |E_x|$ and
//!    $E_y' = |E_y| e^{i(\varphi_y - \varphi_x)}$, fixing the global phase so
//!    states that differ only by an overall phase compare equal.
//! 3. **Truncate** real and imaginary parts below [`TRUNCATION_EPS`] to
//!    exactly zero.
//!
//! Steps 1 and 2 are selected through [`BuildOptions`]; step 3 always runs.
//! Swapping the order changes results at the truncation boundary.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::JonesError;
use crate::stokes::StokesVector;

/// Magnitude below which a real or imaginary part is snapped to zero.
pub const TRUNCATION_EPS: f64 = 1e-15;

/// Which optional construction steps to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Scale to unit intensity.
    pub normalize: bool,
    /// Rewrite in normal form (real, non-negative `ex`).
    pub canonical: bool,
}

impl BuildOptions {
    /// Normalize and canonicalize.
    pub const STANDARD: Self = Self { normalize: true, canonical: true };
    /// Keep components as given (truncation still applies).
    pub const RAW: Self = Self { normalize: false, canonical: false };
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A Jones vector $(E_x, E_y)$.
///
/// Values are immutable once built; every optical operation yields a new
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateFields")]
pub struct PolarizationState {
    ex: Complex64,
    ey: Complex64,
}

/// Serialized components; deserialization rebuilds through the RAW path so
/// truncation still applies.
#[derive(Deserialize)]
struct StateFields {
    ex: Complex64,
    ey: Complex64,
}

impl From<StateFields> for PolarizationState {
    fn from(fields: StateFields) -> Self {
        Self::with_options(fields.ex, fields.ey, BuildOptions::RAW)
    }
}

impl PolarizationState {
    /// Build a normalized, canonical state from two amplitudes.
    pub fn new(ex: impl Into<Complex64>, ey: impl Into<Complex64>) -> Self {
        Self::with_options(ex, ey, BuildOptions::STANDARD)
    }

    /// Build a state, choosing which optional steps run.
    pub fn with_options(
        ex: impl Into<Complex64>,
        ey: impl Into<Complex64>,
        options: BuildOptions,
    ) -> Self {
        let mut state = Self { ex: ex.into(), ey: ey.into() };
        if options.normalize {
            state.normalize();
        }
        if options.canonical {
            state.make_normal_form();
        }
        state.truncate();
        state
    }

    /// Build a state from a sequence that must hold exactly two amplitudes.
    pub fn from_slice(components: &[Complex64], options: BuildOptions) -> Result<Self, JonesError> {
        match components {
            [ex, ey] => Ok(Self::with_options(*ex, *ey, options)),
            _ => Err(JonesError::InvalidDimension { len: components.len() }),
        }
    }

    /// Build a state from real amplitudes.
    pub fn from_reals(components: &[f64], options: BuildOptions) -> Result<Self, JonesError> {
        let complex: Vec<Complex64> = components.iter().map(|&x| Complex64::from(x)).collect();
        Self::from_slice(&complex, options)
    }

    /// Build a state from a 1-D array of length 2.
    pub fn from_array(components: &Array1<Complex64>, options: BuildOptions) -> Result<Self, JonesError> {
        Self::from_slice(&components.to_vec(), options)
    }

    /// Linear horizontal polarization $(1, 0)$.
    pub fn linear_horizontal() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Linear vertical polarization $(0, 1)$.
    pub fn linear_vertical() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Linear diagonal (+45°) polarization $(1, 1)/\sqrt{2}$.
    pub fn linear_diagonal() -> Self {
        Self::new(1.0, 1.0)
    }

    /// Linear anti-diagonal (−45°) polarization $(1, -1)/\sqrt{2}$.
    pub fn linear_antidiagonal() -> Self {
        Self::new(1.0, -1.0)
    }

    /// Linear polarization at `angle_deg` from horizontal: $(\cos\theta, \sin\theta)$.
    pub fn linear(angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        Self::new(theta.cos(), theta.sin())
    }

    /// Right circular polarization $(1, -i)/\sqrt{2}$.
    pub fn circular_right() -> Self {
        Self::new(1.0, Complex64::new(0.0, -1.0))
    }

    /// Left circular polarization $(1, i)/\sqrt{2}$.
    pub fn circular_left() -> Self {
        Self::new(1.0, Complex64::new(0.0, 1.0))
    }

    /// Horizontal amplitude $E_x$.
    pub fn ex(&self) -> Complex64 {
        self.ex
    }

    /// Vertical amplitude $E_y$.
    pub fn ey(&self) -> Complex64 {
        self.ey
    }

    /// Component by index: 0 is $E_x$, 1 is $E_y$.
    pub fn component(&self, index: usize) -> Result<Complex64, JonesError> {
        match index {
            0 => Ok(self.ex),
            1 => Ok(self.ey),
            _ => Err(JonesError::IndexOutOfRange { index }),
        }
    }

    /// Both amplitudes as `[ex, ey]`.
    pub fn components(&self) -> [Complex64; 2] {
        [self.ex, self.ey]
    }

    pub fn to_array(&self) -> Array1<Complex64> {
        Array1::from(vec![self.ex, self.ey])
    }

    /// $I = |E_x|^2 + |E_y|^2$.
    pub fn intensity(&self) -> f64 {
        self.ex.norm_sqr() + self.ey.norm_sqr()
    }

    /// Stokes parameters of this state.
    pub fn stokes(&self) -> StokesVector {
        StokesVector::from_amplitudes(self.ex, self.ey)
    }

    fn set_component(&mut self, index: usize, value: Complex64) {
        match index {
            0 => self.ex = value,
            _ => self.ey = value,
        }
    }

    fn normalize(&mut self) {
        let intensity = self.intensity();
        if intensity == 0.0 {
            log::warn!("Cannot normalize a zero-intensity Jones vector; leaving it unscaled");
            return;
        }
        let scale = intensity.sqrt();
        self.ex /= scale;
        self.ey /= scale;
    }

    fn make_normal_form(&mut self) {
        let (ex_abs, phi_x) = self.ex.to_polar();
        let (ey_abs, phi_y) = self.ey.to_polar();
        self.set_component(0, Complex64::from(ex_abs));
        self.set_component(1, Complex64::from_polar(ey_abs, phi_y - phi_x));
    }

    fn truncate(&mut self) {
        for index in 0..2 {
            let z = self.components()[index];
            let re = if z.re.abs() < TRUNCATION_EPS { 0.0 } else { z.re };
            let im = if z.im.abs() < TRUNCATION_EPS { 0.0 } else { z.im };
            self.set_component(index, Complex64::new(re, im));
        }
    }
}

impl TryFrom<&[Complex64]> for PolarizationState {
    type Error = JonesError;

    fn try_from(components: &[Complex64]) -> Result<Self, Self::Error> {
        Self::from_slice(components, BuildOptions::STANDARD)
    }
}
