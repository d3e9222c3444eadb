//! Theme inheritance and value resolution.
//!
//! Groups are resolved one at a time in document order. For each group a new
//! property map is built:
//!
//! 1. the group's own non-directive properties, raw, in file order
//! 2. `themeName` (the group's name; overrides a declared `themeName`)
//! 3. properties inherited through `@extend` that the group does not declare,
//!    copied from the base group's *resolved* values
//!
//! Then every string property except `themeName` is resolved in that map
//! order, so own keys first and inherited keys after them, all in the group's
//! own context: placeholders see the resolved value of keys above and the raw
//! text of keys below. The raw [`ThemeGroup`] is never modified.
//!
//! Because only already-resolved groups can be extended, a group may extend
//! one defined earlier in the document but never one defined later.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::document::{is_directive, ThemeDocument, ThemeGroup, EXTEND_KEY, NAME_KEY};
use crate::design::{DocumentCache, DocumentSource};
use crate::error::{Result, ThemeError};
use crate::eval::resolve_str;

/// A fully resolved theme group.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub name: String,
    /// Resolved properties, including `themeName`; never contains directives.
    pub values: Map<String, Value>,
}

impl ResolvedTheme {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// Drives resolution for a whole document.
///
/// Owns the design-document cache so that every `get()` in the run shares a
/// single fetch.
#[derive(Debug)]
pub struct Resolver<S> {
    cache: DocumentCache<S>,
}

impl<S: DocumentSource> Resolver<S> {
    pub fn new(source: S) -> Self {
        Self { cache: DocumentCache::new(source) }
    }

    pub fn cache(&self) -> &DocumentCache<S> {
        &self.cache
    }

    /// Resolve every group of `doc`, in document order.
    pub fn resolve_all(&mut self, doc: &ThemeDocument) -> Result<Vec<ResolvedTheme>> {
        let mut resolved: Vec<ResolvedTheme> = Vec::with_capacity(doc.len());
        for group in doc.groups() {
            let theme = self.resolve_group(group, &resolved)?;
            resolved.push(theme);
        }
        Ok(resolved)
    }

    /// Resolve one group against the groups resolved before it.
    pub fn resolve_group(
        &mut self,
        group: &ThemeGroup,
        resolved: &[ResolvedTheme],
    ) -> Result<ResolvedTheme> {
        debug!(theme = %group.name, "resolving theme");

        for directive in group.directives().filter(|d| *d != EXTEND_KEY) {
            warn!(theme = %group.name, directive = %directive, "ignoring unknown directive");
        }

        let mut values: Map<String, Value> =
            group.properties().map(|(k, v)| (k.clone(), v.clone())).collect();
        values.insert(NAME_KEY.to_owned(), Value::String(group.name.clone()));

        if let Some(base_name) = group.extends()? {
            let base = resolved.iter().find(|t| t.name == base_name).ok_or_else(|| {
                ThemeError::format(format!(
                    "base theme {base_name} not found or defined after extending theme {}",
                    group.name
                ))
            })?;
            debug!(theme = %group.name, base = %base.name, "inheriting");
            for (key, value) in &base.values {
                if key == NAME_KEY || is_directive(key) || group.props.contains_key(key) {
                    continue;
                }
                values.insert(key.clone(), value.clone());
            }
        }

        let keys: Vec<String> = values.keys().filter(|k| *k != NAME_KEY).cloned().collect();
        for key in keys {
            let Some(Value::String(raw)) = values.get(&key) else { continue };
            let raw = raw.clone();
            let value = resolve_str(&raw, &values, &mut self.cache)
                .map_err(|e| in_property(e, &group.name, &key))?;
            debug!(theme = %group.name, key = %key, value = %value, "resolved");
            values.insert(key, value);
        }

        Ok(ResolvedTheme { name: group.name.clone(), values })
    }
}

/// Prefix format errors with the property they came from.
fn in_property(err: ThemeError, theme: &str, key: &str) -> ThemeError {
    match err {
        ThemeError::Format(msg) => ThemeError::Format(format!("{theme}.{key}: {msg}")),
        other => other,
    }
}

/// Resolve `doc` with a fresh resolver over `source`.
pub fn resolve_document<S: DocumentSource>(doc: &ThemeDocument, source: S) -> Result<Vec<ResolvedTheme>> {
    Resolver::new(source).resolve_all(doc)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{NoSource, StaticSource};
    use serde_json::json;

    fn resolve(text: &str) -> Result<Vec<ResolvedTheme>> {
        resolve_document(&ThemeDocument::parse(text)?, NoSource)
    }

    fn keys(theme: &ResolvedTheme) -> Vec<&str> {
        theme.values.keys().map(String::as_str).collect()
    }

    #[test]
    fn standalone_group_keeps_own_keys() {
        let themes = resolve(r##"{ "Light": { "fg": "#000", "gap": 4, "@note": "x" } }"##).unwrap();
        assert_eq!(keys(&themes[0]), ["fg", "gap", "themeName"]);
        assert_eq!(themes[0].get("themeName"), Some(&json!("Light")));
        assert_eq!(themes[0].get("gap"), Some(&json!(4)));
    }

    #[test]
    fn child_inherits_resolved_values() {
        let themes = resolve(
            r#"{
                "Base":  { "x": "1", "unit": "{x}px", "flag": true },
                "Child": { "@extend": "Base", "y": "{x}2", "flag": false }
            }"#,
        )
        .unwrap();
        let child = &themes[1];
        assert_eq!(keys(child), ["y", "flag", "themeName", "x", "unit"]);
        assert_eq!(child.get("y"), Some(&json!("12")));
        assert_eq!(child.get("unit"), Some(&json!("1px")));
        assert_eq!(child.get("flag"), Some(&json!(false)));
        assert_eq!(child.get("themeName"), Some(&json!("Child")));
    }

    #[test]
    fn own_key_wins_over_inherited() {
        let themes = resolve(
            r#"{ "A": { "c": "red", "d": "{c}!" }, "B": { "@extend": "A", "c": "blue" } }"#,
        )
        .unwrap();
        assert_eq!(themes[1].get("c"), Some(&json!("blue")));
        // A's "d" was already settled to "red!" before B inherited it.
        assert_eq!(themes[1].get("d"), Some(&json!("red!")));
    }

    #[test]
    fn inherited_strings_resolve_in_child_context() {
        let themes = resolve(
            r#"{ "A": { "a": "{a}", "b": "{a}" }, "B": { "@extend": "A", "a": "z" } }"#,
        )
        .unwrap();
        assert_eq!(themes[0].get("b"), Some(&json!("{a}")));
        assert_eq!(themes[1].get("b"), Some(&json!("z")));
        assert_eq!(themes[1].get("a"), Some(&json!("z")));
    }

    #[test]
    fn inherited_non_strings_are_copied() {
        let themes = resolve(
            r#"{ "A": { "n": 3, "list": ["{x}"] }, "B": { "@extend": "A", "x": "1" } }"#,
        )
        .unwrap();
        assert_eq!(themes[1].get("n"), Some(&json!(3)));
        assert_eq!(themes[1].get("list"), Some(&json!(["{x}"])));
    }

    #[test]
    fn extend_chain() {
        let themes = resolve(
            r#"{ "A": { "a": "1" }, "B": { "@extend": "A", "b": "{a}2" }, "C": { "@extend": "B", "c": "{b}3" } }"#,
        )
        .unwrap();
        assert_eq!(themes[2].get("c"), Some(&json!("123")));
        assert_eq!(themes[2].get("a"), Some(&json!("1")));
    }

    #[test]
    fn extending_a_later_theme_fails() {
        let err = resolve(r#"{ "Child": { "@extend": "Base" }, "Base": {} }"#).unwrap_err();
        assert!(matches!(err, ThemeError::Format(_)));
        let msg = err.to_string();
        assert!(msg.contains("Base"));
        assert!(msg.contains("Child"));
    }

    #[test]
    fn extending_itself_fails() {
        assert!(resolve(r#"{ "T": { "@extend": "T" } }"#).is_err());
    }

    #[test]
    fn theme_name_is_never_overwritten() {
        let themes = resolve(
            r#"{ "A": { "themeName": "fake" }, "B": { "@extend": "A", "label": "{themeName}" } }"#,
        )
        .unwrap();
        assert_eq!(themes[0].get("themeName"), Some(&json!("A")));
        assert_eq!(themes[1].get("themeName"), Some(&json!("B")));
        assert_eq!(themes[1].get("label"), Some(&json!("B")));
    }

    #[test]
    fn forward_reference_sees_raw_text() {
        let themes = resolve(r#"{ "T": { "a": "{b}", "b": "=math(1 + 1)" } }"#).unwrap();
        assert_eq!(themes[0].get("a"), Some(&json!(2)));
        assert_eq!(themes[0].get("b"), Some(&json!(2)));
    }

    #[test]
    fn errors_name_the_property() {
        let err = resolve(r#"{ "T": { "a": "{missing}" } }"#).unwrap_err();
        assert_eq!(err.to_string(), "T.a: No theme var found by name missing");
    }

    #[test]
    fn unknown_function_is_reported() {
        let err = resolve(r#"{ "T": { "a": "=foo(1)" } }"#).unwrap_err();
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn get_uses_a_single_fetch() {
        let design = r#"{ "document": { "children": [
            { "name": "Primary", "fills": [ { "type": "SOLID", "color": { "r": 0, "g": 0, "b": 1, "a": 1 } } ] },
            { "name": "Danger",  "fills": [ { "type": "SOLID", "color": { "r": 1, "g": 0, "b": 0, "a": 0.5 } } ] }
        ] } }"#;
        let doc = ThemeDocument::parse(
            r#"{ "T": { "primary": "=hex(get(#Primary, fills))", "danger": "=hex(get(#Danger,fills))" } }"#,
        )
        .unwrap();
        let mut resolver = Resolver::new(StaticSource::new(design));
        let themes = resolver.resolve_all(&doc).unwrap();
        assert_eq!(themes[0].get("primary"), Some(&json!("#0000FF")));
        assert_eq!(themes[0].get("danger"), Some(&json!("#FF000080")));
        assert_eq!(resolver.cache().source().loads(), 1);
    }

    #[test]
    fn no_fetch_without_get() {
        let doc = ThemeDocument::parse(r#"{ "T": { "a": "=math(2 * 3)" } }"#).unwrap();
        let mut resolver = Resolver::new(NoSource);
        let themes = resolver.resolve_all(&doc).unwrap();
        assert_eq!(themes[0].get("a"), Some(&json!(6)));
        assert!(!resolver.cache().is_loaded());
    }
}
