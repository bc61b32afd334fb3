//! Dispatch of "element applied to something".
//!
//! An element can act on a state (giving a state) or on another element
//! (giving their composition). [`Operand`] tags the right-hand value so the
//! combination is chosen explicitly; anything else is rejected with
//! [`JonesError::UnsupportedOperand`].

use num_complex::Complex64;

use crate::element::OpticalElement;
use crate::error::JonesError;
use crate::polarization::PolarizationState;

/// Right-hand side of [`OpticalElement::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    State(PolarizationState),
    Element(OpticalElement),
    /// Any other value, described by its kind (e.g. `"number 5"`).
    Other(String),
}

impl Operand {
    /// Short description of the operand's kind, for error messages.
    pub fn kind(&self) -> &str {
        match self {
            Operand::State(_) => "polarization state",
            Operand::Element(_) => "optical element",
            Operand::Other(kind) => kind,
        }
    }
}

impl From<PolarizationState> for Operand {
    fn from(state: PolarizationState) -> Self {
        Operand::State(state)
    }
}

impl From<OpticalElement> for Operand {
    fn from(element: OpticalElement) -> Self {
        Operand::Element(element)
    }
}

impl From<f64> for Operand {
    fn from(x: f64) -> Self {
        Operand::Other(format!("number {}", x))
    }
}

impl From<Complex64> for Operand {
    fn from(z: Complex64) -> Self {
        Operand::Other(format!("complex number {}", crate::repr::format_complex(z)))
    }
}

/// Result of [`OpticalElement::apply`], mirroring the operand kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    State(PolarizationState),
    Element(OpticalElement),
}

impl Product {
    pub fn into_state(self) -> Option<PolarizationState> {
        match self {
            Product::State(state) => Some(state),
            Product::Element(_) => None,
        }
    }

    pub fn into_element(self) -> Option<OpticalElement> {
        match self {
            Product::Element(element) => Some(element),
            Product::State(_) => None,
        }
    }
}

impl OpticalElement {
    /// Apply this element to `operand`.
    ///
    /// - state → [`OpticalElement::act_on`], a new state;
    /// - element → [`OpticalElement::compose`], a new element;
    /// - anything else → [`JonesError::UnsupportedOperand`].
    pub fn apply(&self, operand: &Operand) -> Result<Product, JonesError> {
        match operand {
            Operand::State(state) => Ok(Product::State(self.act_on(state))),
            Operand::Element(other) => Ok(Product::Element(self.compose(other))),
            Operand::Other(kind) => Err(JonesError::UnsupportedOperand(kind.clone())),
        }
    }
}
