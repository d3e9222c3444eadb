//! Function-call expressions: `name(arg, arg, ...)`.
//!
//! An expression is whatever follows the leading `=` of a fully substituted
//! theme value. Anything that is not shaped like a call is a plain string and
//! evaluates to itself; that is also how literal arguments such as `#Header`
//! or `2 + 3 * 4` come out of the recursion.
//!
//! The call is the first `name(` in the text; anything before it and anything
//! after its matching `)` is ignored. Arguments are split on commas at
//! parenthesis depth 1 only, so nested calls like `hex(get(#Button, fills))`
//! pass through intact.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use super::builtins::Function;
use crate::error::{Result, ThemeError};

// ── EvalContext ───────────────────────────────────────────────────────────────

/// Access to state outside the expression itself.
///
/// The resolver implements this to give `get()` a path into the design
/// document; it owns the document cache, so the first lookup is the one that
/// triggers the fetch.
pub trait EvalContext {
    /// Resolve `get(...)` path segments to a value.
    fn lookup(&mut self, path: &[Value]) -> Result<Value>;
}

// ── Call splitting ────────────────────────────────────────────────────────────

fn call_regex() -> &'static Regex {
    static CALL: OnceLock<Regex> = OnceLock::new();
    CALL.get_or_init(|| Regex::new(r"(?s)([a-zA-Z]+)\((.*)").expect("call pattern is valid"))
}

/// A call split into its function name and raw (untrimmed) argument texts.
#[derive(Debug, PartialEq)]
pub struct Call<'a> {
    pub name: &'a str,
    pub args: Vec<&'a str>,
}

/// Split `src` into a call, or `Ok(None)` when it is not call-shaped.
pub fn split_call(src: &str) -> Result<Option<Call<'_>>> {
    let Some(caps) = call_regex().captures(src) else {
        return Ok(None);
    };
    let (Some(name), Some(rest)) = (caps.get(1), caps.get(2)) else {
        return Ok(None);
    };
    let rest = rest.as_str();

    let mut args = Vec::new();
    let mut depth = 1usize;
    let mut start = 0;
    let mut end = None;
    for (i, ch) in rest.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    args.push(&rest[start..i]);
                    end = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => {
                args.push(&rest[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    let Some(end) = end else {
        return Err(ThemeError::format(format!("Expected an ending ) character - {src}")));
    };
    let trailing = rest[end + 1..].trim();
    if !trailing.is_empty() {
        trace!(function = name.as_str(), ignored = trailing, "text after call");
    }

    Ok(Some(Call { name: name.as_str(), args }))
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

/// Evaluate an expression (the text after `=`).
pub fn eval_expr(src: &str, ctx: &mut dyn EvalContext) -> Result<Value> {
    let src = src.trim();
    let Some(call) = split_call(src)? else {
        return Ok(Value::String(src.to_owned()));
    };

    let mut args = Vec::with_capacity(call.args.len());
    for arg in call.args {
        let arg = arg.trim();
        if arg.is_empty() {
            args.push(Value::Null);
        } else {
            args.push(eval_expr(arg, ctx)?);
        }
    }

    let func = Function::from_name(call.name)
        .ok_or_else(|| ThemeError::format(format!("No function named '{}' found", call.name)))?;

    trace!(function = %func, argc = args.len(), "calling");
    func.call(args, ctx)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
