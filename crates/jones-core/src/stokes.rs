//! Stokes parameters derived from a Jones vector.
//!
//! $$
//! S_0 = |E_x|^2 + |E_y|^2,\quad S_1 = |E_x|^2 - |E_y|^2,\quad
//! S_2 = 2\,\mathrm{Re}(E_x E_y^*),\quad S_3 = -2\,\mathrm{Im}(E_x E_y^*)
//! $$
//!
//! For a unit-intensity state, $(S_1, S_2, S_3)$ is a point on the Poincaré
//! sphere: H and V on the $S_1$ axis, D and A on $S_2$, the circular states
//! at the poles of $S_3$.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// The four Stokes parameters $(S_0, S_1, S_2, S_3)$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StokesVector {
    pub s0: f64,
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
}

impl StokesVector {
    /// Stokes parameters of the field $(E_x, E_y)$.
    pub fn from_amplitudes(ex: Complex64, ey: Complex64) -> Self {
        let ix = ex.norm_sqr();
        let iy = ey.norm_sqr();
        let cross = ex * ey.conj();
        Self {
            s0: ix + iy,
            s1: ix - iy,
            s2: 2.0 * cross.re,
            s3: -2.0 * cross.im,
        }
    }

    /// As a tuple `(S0, S1, S2, S3)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.s0, self.s1, self.s2, self.s3)
    }

    /// Cartesian point $(S_1, S_2, S_3)$ on the Poincaré sphere.
    ///
    /// Lies on the unit sphere only when $S_0 = 1$.
    pub fn poincare_point(&self) -> [f64; 3] {
        [self.s1, self.s2, self.s3]
    }
}
