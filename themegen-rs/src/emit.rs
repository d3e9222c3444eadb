//! TypeScript output.
//!
//! One interface describing the fields of the first theme, then one constant
//! per theme typed by that interface:
//!
//! ```text
//! export interface AppTheme
//! {
//!     fg:string;
//!     themeName:string;
//! }
//!
//! export const LightTheme:AppTheme=
//! {
//!     fg:"#000",
//!     themeName:"Light",
//! }
//! ```

use crate::error::{Result, ThemeError};
use crate::eval::value::ts_type;
use crate::theme::ResolvedTheme;

/// Render resolved themes as TypeScript declarations.
pub fn render(interface: &str, themes: &[ResolvedTheme]) -> Result<String> {
    let first = themes
        .first()
        .ok_or_else(|| ThemeError::format("No themes defined"))?;

    let mut out = format!("export interface {interface}\n{{\n");
    for (key, value) in &first.values {
        out.push_str(&format!("    {key}:{};\n", ts_type(value)));
    }
    out.push_str("}\n\n");

    for theme in themes {
        out.push_str(&format!("export const {}Theme:{interface}=\n{{\n", theme.name));
        for (key, value) in &theme.values {
            out.push_str(&format!("    {key}:{},\n", serde_json::to_string(value)?));
        }
        out.push_str("}\n\n");
    }

    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn theme(name: &str, values: Value) -> ResolvedTheme {
        let values: Map<String, Value> = values.as_object().cloned().unwrap();
        ResolvedTheme { name: name.into(), values }
    }

    #[test]
    fn renders_interface_and_constants() {
        let themes = vec![
            theme("Light", json!({ "fg": "#000", "gap": 4, "fills": [], "themeName": "Light" })),
            theme("Dark", json!({ "fg": "#FFF", "gap": 4.5, "fills": [], "themeName": "Dark" })),
        ];
        let out = render("AppTheme", &themes).unwrap();
        let expected = "\
export interface AppTheme
{
    fg:string;
    gap:number;
    fills:any;
    themeName:string;
}

export const LightTheme:AppTheme=
{
    fg:\"#000\",
    gap:4,
    fills:[],
    themeName:\"Light\",
}

export const DarkTheme:AppTheme=
{
    fg:\"#FFF\",
    gap:4.5,
    fills:[],
    themeName:\"Dark\",
}

";
        assert_eq!(out, expected);
    }

    #[test]
    fn strings_are_json_escaped() {
        let themes = vec![theme("T", json!({ "quote": "say \"hi\"\n" }))];
        let out = render("I", &themes).unwrap();
        assert!(out.contains(r#"    quote:"say \"hi\"\n","#));
    }

    #[test]
    fn structured_values_are_compact_json() {
        let themes = vec![theme("T", json!({ "shadow": { "x": 1, "y": [2, 3] } }))];
        let out = render("I", &themes).unwrap();
        assert!(out.contains(r#"    shadow:{"x":1,"y":[2,3]},"#));
    }

    #[test]
    fn no_themes_is_an_error() {
        assert!(render("I", &[]).is_err());
    }
}
