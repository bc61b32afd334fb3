//! Textual representation of Jones vectors and matrices.
//!
//! States render as `JonesVector([ex, ey])` and elements as
//! `JonesMatrix([[m00, m01], [m10, m11]])`, with each complex number written
//! as `<re><±im>i` at shortest round-trip precision. Both forms parse back
//! through [`FromStr`], so rendering a parsed value reproduces the input text.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;

use crate::element::OpticalElement;
use crate::error::JonesError;
use crate::polarization::{BuildOptions, PolarizationState};

const VECTOR_TAG: &str = "JonesVector";
const MATRIX_TAG: &str = "JonesMatrix";

/// Render a complex number as `re±imi`, e.g. `0.5-0.25i`.
///
/// `{:+}` prints NaN without a sign, so it is written as `+NaN` by hand to
/// keep the split point that [`parse_complex`] relies on.
pub fn format_complex(z: Complex64) -> String {
    if z.im.is_nan() {
        format!("{}+NaNi", z.re)
    } else {
        format!("{}{:+}i", z.re, z.im)
    }
}

/// Parse a complex number written as `re±imi`, a bare real (`-1.5`) or a
/// bare imaginary (`2i`, `-i`). Exponents (`1e-3+2i`) are accepted.
pub fn parse_complex(text: &str) -> Result<Complex64, JonesError> {
    let s = text.trim();
    let bad = || JonesError::Parse(format!("'{}' is not a complex number", text));

    let Some(body) = s.strip_suffix('i') else {
        return s.parse::<f64>().map(Complex64::from).map_err(|_| bad());
    };

    // Split at the last sign that is neither leading nor part of an exponent
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    match split {
        Some(at) => {
            let re = body[..at].parse::<f64>().map_err(|_| bad())?;
            let im = parse_imaginary(&body[at..]).ok_or_else(bad)?;
            Ok(Complex64::new(re, im))
        }
        None => {
            let im = parse_imaginary(body).ok_or_else(bad)?;
            Ok(Complex64::new(0.0, im))
        }
    }
}

/// Imaginary coefficient, where a bare sign (or nothing) stands for one.
fn parse_imaginary(coefficient: &str) -> Option<f64> {
    match coefficient {
        "" | "+" => Some(1.0),
        "-" => Some(-1.0),
        other => other.parse().ok(),
    }
}

/// Strip `Tag(` ... `)` from a representation.
fn unwrap_tagged<'a>(text: &'a str, tag: &str) -> Result<&'a str, JonesError> {
    text.trim()
        .strip_prefix(tag)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.trim_end().strip_suffix(')'))
        .ok_or_else(|| JonesError::Parse(format!("expected {}(...), got '{}'", tag, text.trim())))
}

/// Strip one level of square brackets.
fn unwrap_brackets(text: &str) -> Result<&str, JonesError> {
    text.trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| JonesError::Parse(format!("expected [...], got '{}'", text.trim())))
}

fn parse_row(text: &str) -> Result<Vec<Complex64>, JonesError> {
    let inner = unwrap_brackets(text)?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner.split(',').map(parse_complex).collect()
}

/// Split `[a, b], [c, d]` into its bracketed rows.
fn split_rows(text: &str) -> Result<Vec<&str>, JonesError> {
    let mut rows = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (i, ch) in text.char_indices() {
        match ch {
            '[' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| JonesError::Parse("unbalanced ']'".into()))?;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        rows.push(&text[s..=i]);
                    }
                }
            }
            ',' | ' ' | '\t' | '\n' if depth == 0 => {}
            other if depth == 0 => {
                return Err(JonesError::Parse(format!(
                    "unexpected '{}' between matrix rows",
                    other
                )))
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(JonesError::Parse("unbalanced '['".into()));
    }
    Ok(rows)
}

impl fmt::Display for PolarizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}([{}, {}])",
            VECTOR_TAG,
            format_complex(self.ex()),
            format_complex(self.ey())
        )
    }
}

impl FromStr for PolarizationState {
    type Err = JonesError;

    /// Components are taken verbatim: no normalization or canonicalization,
    /// only the near-zero truncation every state goes through.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = parse_row(unwrap_tagged(s, VECTOR_TAG)?)?;
        PolarizationState::from_slice(&components, BuildOptions::RAW)
    }
}

impl fmt::Display for OpticalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix();
        write!(
            f,
            "{}([[{}, {}], [{}, {}]])",
            MATRIX_TAG,
            format_complex(m[0][0]),
            format_complex(m[0][1]),
            format_complex(m[1][0]),
            format_complex(m[1][1])
        )
    }
}

impl FromStr for OpticalElement {
    type Err = JonesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = unwrap_brackets(unwrap_tagged(s, MATRIX_TAG)?)?;
        let rows = split_rows(body)?
            .into_iter()
            .map(parse_row)
            .collect::<Result<Vec<_>, _>>()?;
        OpticalElement::from_rows(&rows)
    }
}
