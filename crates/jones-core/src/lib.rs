//! # Jones Core
//!
//! Jones calculus for fully polarized light. A polarization state is a
//! 2-component complex vector $(E_x, E_y)$; a linear optical element
//! (polarizer, wave plate, retarder) is a 2x2 complex matrix acting on it.
//!
//! ```
//! use jones_core::{OpticalElement, PolarizationState};
//!
//! let light = PolarizationState::linear_horizontal();
//! let system = OpticalElement::polarizer_vertical().compose(&OpticalElement::polarizer(45.0));
//! let out = system.act_on(&light);
//! assert!((out.intensity() - 0.25).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`polarization`] — Jones vectors, normalization and normal form.
//! - [`element`] — Jones matrices and the standard optical elements.
//! - [`operand`] — Explicit dispatch of element × {state, element}.
//! - [`stokes`] — Stokes parameters and Poincaré-sphere coordinates.
//! - [`repr`] — Textual representation and parsing.
//! - [`input`] — Construction from loosely typed (JSON/TOML) values.
//! - [`poincare`] — Point collection for Poincaré-sphere plots.
//! - [`sweep`] — Angle sweeps over an optical system.
//! - [`error`] — The shared error type.

pub mod element;
pub mod error;
pub mod input;
pub mod operand;
pub mod poincare;
pub mod polarization;
pub mod repr;
pub mod stokes;
pub mod sweep;

pub use element::OpticalElement;
pub use error::JonesError;
pub use operand::{Operand, Product};
pub use polarization::{BuildOptions, PolarizationState};
pub use stokes::StokesVector;
