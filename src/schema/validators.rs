//! Stock validators for style descriptors.

use std::sync::Arc;

use super::style::Validator;
use crate::core::value::type_name;
use crate::core::{DrawError, Value};

/// Accepts one of a fixed set of strings.
pub fn one_of(allowed: &[&str]) -> Validator {
    let allowed: Vec<String> = allowed.iter().map(|s| s.to_string()).collect();
    Arc::new(move |value: &Value| match value.as_str() {
        Some(s) if allowed.iter().any(|a| a == s) => Ok(Value::from(s)),
        _ => Err(DrawError::invalid_value(format!(
            "expected one of [{}], got {}",
            allowed.join(", "),
            value
        ))),
    })
}

/// Booleans, plus the strings `"true"` / `"false"`.
pub fn boolean() -> Validator {
    Arc::new(|value: &Value| match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::String(s) if s == "true" => Ok(Value::Bool(true)),
        Value::String(s) if s == "false" => Ok(Value::Bool(false)),
        other => Err(DrawError::invalid_value(format!(
            "expected a boolean, got {}",
            type_name(other)
        ))),
    })
}

/// Integers; integral floats and numeric strings are converted.
pub fn integer() -> Validator {
    Arc::new(|value: &Value| {
        as_integer(value).map(Value::from).ok_or_else(|| {
            DrawError::invalid_value(format!("expected an integer, got {}", value))
        })
    })
}

/// Any finite number; numeric strings are converted.
pub fn number() -> Validator {
    Arc::new(|value: &Value| {
        let n = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match n {
            Some(n) if n.is_finite() => Ok(canonical_number(n)),
            _ => Err(DrawError::invalid_value(format!(
                "expected a number, got {}",
                value
            ))),
        }
    })
}

/// Strings; numbers and booleans are stringified.
pub fn string() -> Validator {
    Arc::new(|value: &Value| match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(DrawError::invalid_value(format!(
            "expected a string, got {}",
            type_name(other)
        ))),
    })
}

/// Geometry: integer pixels, a float fraction, `"12px"` or `"50%"`.
///
/// Canonical forms are an integer for pixel values, a float for fractions and
/// the normalized `"N%"` string for percentages.
pub fn dimension() -> Validator {
    Arc::new(|value: &Value| parse_dimension(value))
}

/// Margin: a single dimension, or a list of exactly four (left, top, right, bottom).
pub fn margin() -> Validator {
    Arc::new(|value: &Value| match value {
        Value::Array(items) => {
            if items.len() != 4 {
                return Err(DrawError::invalid_value(format!(
                    "margin needs 4 values, got {}",
                    items.len()
                )));
            }
            items
                .iter()
                .map(parse_dimension)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        other => parse_dimension(other),
    })
}

/// Accepts `null` as-is and defers everything else to `inner`.
pub fn optional(inner: Validator) -> Validator {
    Arc::new(move |value: &Value| {
        if value.is_null() {
            Ok(Value::Null)
        } else {
            inner(value)
        }
    })
}

fn parse_dimension(value: &Value) -> Result<Value, DrawError> {
    let bad = || {
        DrawError::invalid_value(format!("expected a numeric dimension, got {}", value))
    };
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(canonical_number)
                    .ok_or_else(bad)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Some(pct) = s.strip_suffix('%') {
                let n: f64 = pct.trim().parse().map_err(|_| bad())?;
                Ok(Value::String(format!("{}%", trim_float(n))))
            } else if let Some(px) = s.strip_suffix("px") {
                px.trim()
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| bad())
            } else {
                s.parse::<i64>().map(Value::from).map_err(|_| bad())
            }
        }
        _ => Err(bad()),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn canonical_number(n: f64) -> Value {
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn trim_float(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validators.rs"]
mod tests;
