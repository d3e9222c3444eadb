//! Theme value evaluation.
//!
//! A raw string property goes through two stages:
//!
//! - `{name}` placeholders are substituted from sibling properties until
//!   nothing changes ([`expand`])
//! - if the result starts with `=`, the rest is evaluated as a function call
//!   (`get`, `hex`, `math`; see [`builtins::Function`])
//!
//! ```rust
//! use serde_json::json;
//! use themegen::eval::{resolve_str, EvalContext};
//! use themegen::Result;
//!
//! struct Offline;
//! impl EvalContext for Offline {
//!     fn lookup(&mut self, _path: &[serde_json::Value]) -> Result<serde_json::Value> {
//!         Ok(serde_json::Value::Null)
//!     }
//! }
//!
//! let vars = json!({ "unit": 4 }).as_object().cloned().unwrap();
//! let v = resolve_str("=math({unit} * 3)", &vars, &mut Offline).unwrap();
//! assert_eq!(v, json!(12));
//! ```

pub mod arith;
pub mod builtins;
pub mod expand;
pub mod expr;
pub mod value;

// Re-exports for convenience.
pub use expand::{expand, resolve_str};
pub use expr::{eval_expr, EvalContext};
