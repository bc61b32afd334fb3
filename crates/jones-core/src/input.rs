//! Construction from loosely typed input (JSON, or TOML converted to JSON).
//!
//! A scalar may be written as a number (`1`, `-0.5`), a complex string
//! (`"0-1i"`), or a table `{ re = .., im = .. }` (`im` defaults to zero).
//! States are arrays of two scalars, elements arrays of two rows of two.
//! Input of the wrong kind is an [`JonesError::InvalidType`]; input of the
//! right kind but wrong size is an [`JonesError::InvalidDimension`] or
//! [`JonesError::InvalidShape`].

use num_complex::Complex64;
use serde_json::Value;

use crate::element::OpticalElement;
use crate::error::JonesError;
use crate::polarization::{BuildOptions, PolarizationState};
use crate::repr::parse_complex;

/// Human-readable kind of a JSON value.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}

/// Read one complex scalar.
pub fn scalar_from_value(value: &Value) -> Result<Complex64, JonesError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(Complex64::from)
            .ok_or_else(|| JonesError::InvalidType(format!("number {} is not representable as f64", n))),
        Value::String(s) => parse_complex(s)
            .map_err(|_| JonesError::InvalidType(format!("string '{}' is not a complex number", s))),
        Value::Object(map) => {
            let part = |key: &str| -> Result<f64, JonesError> {
                match map.get(key) {
                    None => Ok(0.0),
                    Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                        JonesError::InvalidType(format!("'{}' = {} is not representable as f64", key, n))
                    }),
                    Some(other) => Err(JonesError::InvalidType(format!(
                        "'{}' must be a number, got {}",
                        key,
                        value_kind(other)
                    ))),
                }
            };
            if let Some(key) = map.keys().find(|k| *k != "re" && *k != "im") {
                return Err(JonesError::InvalidType(format!(
                    "unexpected key '{}' in complex table (expected 're' and 'im')",
                    key
                )));
            }
            Ok(Complex64::new(part("re")?, part("im")?))
        }
        other => Err(JonesError::InvalidType(format!(
            "expected a numeric value, got {}",
            value_kind(other)
        ))),
    }
}

/// Read a state from an array of exactly two scalars.
pub fn state_from_value(value: &Value, options: BuildOptions) -> Result<PolarizationState, JonesError> {
    let Value::Array(items) = value else {
        return Err(JonesError::InvalidType(format!(
            "a Jones vector must be an array of 2 numbers, got {}",
            value_kind(value)
        )));
    };
    if items.len() != 2 {
        return Err(JonesError::InvalidDimension { len: items.len() });
    }
    let components = items
        .iter()
        .map(scalar_from_value)
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!("Read Jones vector components {:?}", components);
    PolarizationState::from_slice(&components, options)
}

/// Read an element from an array of two rows of two scalars each.
pub fn element_from_value(value: &Value) -> Result<OpticalElement, JonesError> {
    let Value::Array(rows) = value else {
        return Err(JonesError::InvalidType(format!(
            "a Jones matrix must be a 2x2 array, got {}",
            value_kind(value)
        )));
    };
    let rows = rows
        .iter()
        .map(|row| match row {
            Value::Array(items) => Ok(items),
            other => Err(JonesError::InvalidType(format!(
                "matrix rows must be arrays, got {}",
                value_kind(other)
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let lengths: Vec<usize> = rows.iter().map(|r| r.len()).collect();
    if lengths != [2, 2] {
        return Err(JonesError::shape(&lengths));
    }

    let rows = rows
        .into_iter()
        .map(|row| row.iter().map(scalar_from_value).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    OpticalElement::from_rows(&rows)
}
