//! Built-in expression functions.
//!
//! The set is closed: every function an expression may call is a variant of
//! [`Function`], so adding one means adding a variant and a match arm.
//! Each function receives already-evaluated arguments.

use std::fmt;

use serde_json::Value;

use super::arith::eval_arith;
use super::expr::EvalContext;
use super::value::number_from_f64;
use crate::error::{Result, ThemeError};

/// A function callable from a `=name(...)` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// `get(seg, ...)`: path lookup in the design document.
    Get,
    /// `hex(fills)`: first solid fill as `#RRGGBB[AA]`.
    Hex,
    /// `math(expr)`: arithmetic on a substituted string.
    Math,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "get" => Some(Function::Get),
            "hex" => Some(Function::Hex),
            "math" => Some(Function::Math),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Get => "get",
            Function::Hex => "hex",
            Function::Math => "math",
        }
    }

    pub fn call(self, args: Vec<Value>, ctx: &mut dyn EvalContext) -> Result<Value> {
        match self {
            Function::Get => ctx.lookup(&args),
            Function::Hex => hex(&args).map(Value::String),
            Function::Math => math(&args),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── hex ───────────────────────────────────────────────────────────────────────

fn hex(args: &[Value]) -> Result<String> {
    let [fills] = args else {
        return Err(ThemeError::format(format!(
            "hex: expected a fills array as the only argument, got {} arguments",
            args.len()
        )));
    };
    let fills = fills
        .as_array()
        .ok_or_else(|| ThemeError::format("hex: expected a fills array as the only argument"))?;

    let color = fills
        .iter()
        .find(|fill| fill.get("type").and_then(Value::as_str) == Some("SOLID"))
        .and_then(|fill| fill.get("color"))
        .filter(|color| color.is_object())
        .ok_or_else(|| ThemeError::format("hex: solid color expected"))?;

    let r = channel(color, "r")?;
    let g = channel(color, "g")?;
    let b = channel(color, "b")?;
    // Colors without an alpha channel are opaque.
    let a = match color.get("a") {
        Some(_) => channel(color, "a")?,
        None => 1.0,
    };

    let mut out = format!("#{:02X}{:02X}{:02X}", to_byte(r), to_byte(g), to_byte(b));
    if a < 1.0 {
        out.push_str(&format!("{:02X}", to_byte(a)));
    }
    Ok(out)
}

fn channel(color: &Value, name: &str) -> Result<f64> {
    color
        .get(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| ThemeError::format(format!("hex: color channel '{name}' missing or not a number")))
}

fn to_byte(c: f64) -> u8 {
    (255.0 * c.clamp(0.0, 1.0)).round() as u8
}

// ── math ──────────────────────────────────────────────────────────────────────

fn math(args: &[Value]) -> Result<Value> {
    let [arg] = args else {
        return Err(ThemeError::format(format!(
            "math: expected an arithmetic expression as the only argument, got {} arguments",
            args.len()
        )));
    };
    let result = match arg {
        Value::String(src) => eval_arith(src)?,
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        _ => {
            return Err(ThemeError::format(
                "math: expected an arithmetic expression as the only argument",
            ))
        }
    };
    number_from_f64(result)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoDocument;

    impl EvalContext for NoDocument {
        fn lookup(&mut self, _path: &[Value]) -> Result<Value> {
            Err(ThemeError::config("no document in test ctx"))
        }
    }

    fn solid(r: f64, g: f64, b: f64, a: f64) -> Value {
        json!([{ "type": "SOLID", "color": { "r": r, "g": g, "b": b, "a": a } }])
    }

    #[test]
    fn names_round_trip() {
        for f in [Function::Get, Function::Hex, Function::Math] {
            assert_eq!(Function::from_name(f.name()), Some(f));
        }
        assert_eq!(Function::from_name("foo"), None);
        assert_eq!(Function::from_name("HEX"), None);
    }

    #[test]
    fn hex_opaque_red() {
        assert_eq!(hex(&[solid(1.0, 0.0, 0.0, 1.0)]).unwrap(), "#FF0000");
    }

    #[test]
    fn hex_translucent_appends_alpha() {
        assert_eq!(hex(&[solid(1.0, 0.0, 0.0, 0.5)]).unwrap(), "#FF000080");
        assert_eq!(hex(&[solid(0.0, 0.0, 0.0, 0.0)]).unwrap(), "#00000000");
    }

    #[test]
    fn hex_rounds_channels() {
        // 0.2 * 255 = 51, 0.6 * 255 = 153
        assert_eq!(hex(&[solid(0.2, 0.6, 1.0, 1.0)]).unwrap(), "#3399FF");
    }

    #[test]
    fn hex_skips_non_solid_fills() {
        let fills = json!([
            { "type": "GRADIENT_LINEAR", "color": { "r": 0, "g": 0, "b": 0, "a": 1 } },
            { "type": "SOLID", "color": { "r": 0, "g": 1, "b": 0, "a": 1 } }
        ]);
        assert_eq!(hex(&[fills]).unwrap(), "#00FF00");
    }

    #[test]
    fn hex_without_alpha_is_opaque() {
        let fills = json!([{ "type": "SOLID", "color": { "r": 0, "g": 0, "b": 1 } }]);
        assert_eq!(hex(&[fills]).unwrap(), "#0000FF");
    }

    #[test]
    fn hex_errors() {
        assert!(hex(&[]).is_err());
        assert!(hex(&[json!("red")]).is_err());
        let no_solid = json!([{ "type": "IMAGE" }]);
        assert!(hex(&[no_solid]).unwrap_err().to_string().contains("solid color expected"));
        let bad_channel = json!([{ "type": "SOLID", "color": { "r": "x", "g": 0, "b": 0 } }]);
        assert!(hex(&[bad_channel]).is_err());
    }

    #[test]
    fn math_evaluates_string() {
        assert_eq!(math(&[json!("2 + 3 * 4")]).unwrap(), json!(14));
        assert_eq!(math(&[json!("3 / 2")]).unwrap(), json!(1.5));
    }

    #[test]
    fn math_arity() {
        assert!(math(&[]).is_err());
        assert!(math(&[json!("1"), json!("2")]).is_err());
        assert!(math(&[Value::Null]).is_err());
    }

    #[test]
    fn get_goes_through_context() {
        let err = Function::Get.call(vec![json!("#Header")], &mut NoDocument).unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
    }
}
