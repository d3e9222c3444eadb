//! Helpers over the property value type.
//!
//! Theme properties are plain JSON values: strings may still carry
//! placeholders or an expression, numbers and booleans pass through, and
//! arrays/objects are opaque trees (typically pulled out of the design
//! document by `get`).

use serde_json::{Number, Value};

use crate::error::{Result, ThemeError};

/// Textual form of a value when it is spliced into a string by `{name}`.
///
/// Strings are inserted verbatim, scalars use their JSON spelling, `null`
/// becomes the empty string, and structured values are compact JSON.
pub fn text_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// TypeScript type inferred for an interface field.
pub fn ts_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        _ => "any",
    }
}

/// Convert an arithmetic result into a JSON number.
///
/// Integral results that fit in an `i64` are stored as integers so that
/// `math(2 + 3 * 4)` emits `14` rather than `14.0`.
pub fn number_from_f64(x: f64) -> Result<Value> {
    if !x.is_finite() {
        return Err(ThemeError::format(format!("arithmetic result is not a finite number: {x}")));
    }
    if x.fract() == 0.0 && x.abs() < 9.0e15 {
        return Ok(Value::Number(Number::from(x as i64)));
    }
    Number::from_f64(x)
        .map(Value::Number)
        .ok_or_else(|| ThemeError::format(format!("arithmetic result is not representable: {x}")))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
