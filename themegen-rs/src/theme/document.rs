//! Theme document model.
//!
//! A theme document is a JSON object whose fields are theme groups, in the
//! order they appear in the file:
//!
//! ```json
//! {
//!     "Light": { "fg": "#000", "gap": 4 },
//!     "Dark":  { "@extend": "Light", "fg": "#FFF" }
//! }
//! ```
//!
//! Keys starting with `@` are directives. Only `@extend` is interpreted; the
//! rest are reserved and ignored.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Result, ThemeError};

/// Key injected into every resolved group, holding the group's name.
pub const NAME_KEY: &str = "themeName";

/// Directive naming the base group to inherit from.
pub const EXTEND_KEY: &str = "@extend";

/// Returns `true` for directive keys (`@extend`, ...).
pub fn is_directive(key: &str) -> bool {
    key.starts_with('@')
}

/// One named group of raw, unresolved properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeGroup {
    pub name: String,
    pub props: Map<String, Value>,
}

impl ThemeGroup {
    pub fn new(name: impl Into<String>, props: Map<String, Value>) -> Self {
        Self { name: name.into(), props }
    }

    /// Declared non-directive properties, in file order.
    pub fn properties(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.props.iter().filter(|(k, _)| !is_directive(k))
    }

    /// Declared directive keys, in file order.
    pub fn directives(&self) -> impl Iterator<Item = &String> {
        self.props.keys().filter(|k| is_directive(k))
    }

    /// Name of the group this one extends, if any.
    pub fn extends(&self) -> Result<Option<&str>> {
        match self.props.get(EXTEND_KEY) {
            None => Ok(None),
            Some(Value::String(base)) => Ok(Some(base.as_str())),
            Some(other) => Err(ThemeError::format(format!(
                "{EXTEND_KEY} in theme {} must be a theme name, found {other}",
                self.name
            ))),
        }
    }
}

/// All theme groups of a document, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDocument {
    groups: Vec<ThemeGroup>,
}

impl ThemeDocument {
    /// Parse a theme document from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Object(root) = root else {
            return Err(ThemeError::format("theme document must be a JSON object of themes"));
        };

        let mut groups = Vec::with_capacity(root.len());
        for (name, props) in root {
            let Value::Object(props) = props else {
                return Err(ThemeError::format(format!("theme {name} must be a JSON object")));
            };
            groups.push(ThemeGroup::new(name, props));
        }
        Self::from_groups(groups)
    }

    /// Read and parse a theme document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn from_groups(groups: Vec<ThemeGroup>) -> Result<Self> {
        if groups.is_empty() {
            return Err(ThemeError::format("No themes defined"));
        }
        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[ThemeGroup] {
        &self.groups
    }

    pub fn get(&self, name: &str) -> Option<&ThemeGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
