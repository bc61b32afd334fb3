//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors raised while constructing, querying, or combining Jones values.
///
/// All failures are immediate: an operation either returns a valid value or
/// one of these errors, and never leaves an operand modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JonesError {
    #[error("Jones vector must have exactly 2 components, got {len}")]
    InvalidDimension { len: usize },

    #[error("Jones matrix must be 2x2, got {shape}")]
    InvalidShape { shape: String },

    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error("Component index {index} out of range (expected 0 or 1)")]
    IndexOutOfRange { index: usize },

    #[error("Unsupported operand: an optical element acts only on a polarization state or another element, got {0}")]
    UnsupportedOperand(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl JonesError {
    /// Shape error for a matrix with `rows` rows, describing ragged rows by
    /// their individual lengths.
    pub(crate) fn shape(rows: &[usize]) -> Self {
        let shape = if rows.iter().all(|&len| Some(&len) == rows.first()) && !rows.is_empty() {
            format!("{}x{}", rows.len(), rows[0])
        } else {
            format!("{} rows with lengths {:?}", rows.len(), rows)
        };
        JonesError::InvalidShape { shape }
    }
}
