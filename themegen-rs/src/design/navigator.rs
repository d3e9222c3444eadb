//! Path lookup inside a fetched design document.
//!
//! `get()` arguments are path segments applied one after another, starting
//! at the document's content root (the `document` field of the API
//! response):
//!
//! | Segment  | Meaning                                                    |
//! |----------|------------------------------------------------------------|
//! | `#Name`  | Descendant node whose `name` is `Name`                     |
//! | `field`  | Field of the current node; the last one may be any value   |
//! |          | (null when absent), earlier ones must be objects           |
//! | blank    | Skipped (also non-string arguments, e.g. from `get(a,,b)`) |

use serde_json::Value;

use crate::error::{Result, ThemeError};

/// Field of the API response holding the node tree.
pub const CONTENT_ROOT: &str = "document";

/// Find the first descendant of `parent` named `name`.
///
/// Direct children are checked before descending, then each child's subtree
/// is searched in order.
pub fn find_node<'a>(parent: &'a Value, name: &str) -> Option<&'a Value> {
    let children = parent.get("children")?.as_array()?;
    let nodes = || children.iter().filter(|c| c.is_object());

    nodes()
        .find(|c| c.get("name").and_then(Value::as_str) == Some(name))
        .or_else(|| nodes().find_map(|c| find_node(c, name)))
}

/// Resolve `path` against `doc` (a whole API response).
pub fn navigate(doc: &Value, path: &[Value]) -> Result<Value> {
    let root = doc
        .get(CONTENT_ROOT)
        .filter(|v| v.is_object())
        .ok_or_else(|| ThemeError::format(format!("design document has no '{CONTENT_ROOT}' node")))?;

    let segments: Vec<&str> = path
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .collect();

    let mut node = root;
    for (i, seg) in segments.iter().enumerate() {
        let is_last = i + 1 == segments.len();

        if let Some(name) = seg.strip_prefix('#') {
            node = find_node(node, name).ok_or_else(|| {
                ThemeError::format(format!("get() found no node named '{name}' - {seg}"))
            })?;
            continue;
        }

        let field = node.get(*seg);
        if is_last {
            return Ok(field.cloned().unwrap_or(Value::Null));
        }
        node = field.filter(|f| f.is_object()).ok_or_else(|| {
            ThemeError::format(format!("get() path argument does not point to an object - {seg}"))
        })?;
    }

    Ok(node.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
