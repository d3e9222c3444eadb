//! `{name}` placeholder substitution.
//!
//! | Sequence      | Meaning                                                |
//! |---------------|--------------------------------------------------------|
//! | `{name}`      | Textual form of the sibling property `name`            |
//! | `=expr`       | After substitution: evaluate `expr` as a function call |
//!
//! Substitution runs whole passes over the string until a pass changes
//! nothing, so a placeholder may expand to text containing further
//! placeholders. Lookups see the group's current values: keys resolved
//! earlier in the group hold their resolved value, later keys still hold
//! their raw text.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::expr::{eval_expr, EvalContext};
use super::value::text_form;
use crate::error::{Result, ThemeError};

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// Run one substitution pass over `src`.
fn expand_once(src: &str, vars: &Map<String, Value>) -> Result<String> {
    let mut out = String::with_capacity(src.len());
    let mut last = 0;
    for caps in placeholder_regex().captures_iter(src) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = vars.get(name.as_str()).ok_or_else(|| {
            ThemeError::format(format!("No theme var found by name {}", name.as_str()))
        })?;
        out.push_str(&src[last..whole.start()]);
        out.push_str(&text_form(value));
        last = whole.end();
    }
    out.push_str(&src[last..]);
    Ok(out)
}

/// Substitute placeholders in `src` until a fixed point is reached.
///
/// An acyclic chain of references can be at most one link per property, so
/// a string still changing after `vars.len() + 1` passes is expanding a
/// reference cycle and is reported instead of looping forever.
pub fn expand(src: &str, vars: &Map<String, Value>) -> Result<String> {
    let max_passes = vars.len() + 1;
    let mut current = src.to_owned();
    for _ in 0..max_passes {
        let next = expand_once(&current, vars)?;
        if next == current {
            return Ok(current);
        }
        current = next;
    }
    Err(ThemeError::format(format!(
        "variable reference cycle while expanding '{src}'"
    )))
}

/// Fully resolve a raw string property: substitute, then evaluate if the
/// result is an `=` expression.
pub fn resolve_str(src: &str, vars: &Map<String, Value>, ctx: &mut dyn EvalContext) -> Result<Value> {
    let expanded = expand(src, vars)?;
    match expanded.strip_prefix('=') {
        Some(expr) => eval_expr(expr, ctx),
        None => Ok(Value::String(expanded)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
