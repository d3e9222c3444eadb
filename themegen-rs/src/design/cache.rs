//! Memoized design document.
//!
//! [`DocumentCache`] owns a [`DocumentSource`] and asks it for the document
//! at most once: the first `get()` in a run loads and parses it, every later
//! lookup reuses the parsed tree. Nothing is fetched for theme files that
//! never call `get()`.

use serde_json::Value;
use tracing::debug;

use super::navigator::navigate;
use crate::error::{Result, ThemeError};
use crate::eval::EvalContext;

/// Supplies the raw JSON text of the design document.
pub trait DocumentSource {
    fn load(&mut self) -> Result<String>;
}

/// A source for runs without design-document access.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSource;

impl DocumentSource for NoSource {
    fn load(&mut self) -> Result<String> {
        Err(ThemeError::config("get() used but no design document source is configured"))
    }
}

/// A source serving a fixed document (offline runs, tests).
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
    loads: usize,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), loads: 0 }
    }

    /// Number of times the document has been requested.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl DocumentSource for StaticSource {
    fn load(&mut self) -> Result<String> {
        self.loads += 1;
        Ok(self.text.clone())
    }
}

/// Lazily loaded, parsed design document.
#[derive(Debug)]
pub struct DocumentCache<S> {
    source: S,
    doc: Option<Value>,
}

impl<S: DocumentSource> DocumentCache<S> {
    pub fn new(source: S) -> Self {
        Self { source, doc: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.doc.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The parsed document, loading it on first call.
    pub fn document(&mut self) -> Result<&Value> {
        let doc = match self.doc.take() {
            Some(doc) => doc,
            None => {
                let text = self.source.load()?;
                debug!(bytes = text.len(), "parsing design document");
                serde_json::from_str(&text)?
            }
        };
        let doc: &Value = self.doc.insert(doc);
        Ok(doc)
    }
}

impl<S: DocumentSource> EvalContext for DocumentCache<S> {
    fn lookup(&mut self, path: &[Value]) -> Result<Value> {
        navigate(self.document()?, path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOC: &str = r#"{
        "document": {
            "name": "Document",
            "children": [ { "name": "Header", "fills": [] } ]
        }
    }"#;

    #[test]
    fn loads_lazily_and_once() {
        let mut cache = DocumentCache::new(StaticSource::new(DOC));
        assert!(!cache.is_loaded());
        assert_eq!(cache.source().loads(), 0);

        let fills = cache.lookup(&[json!("#Header"), json!("fills")]).unwrap();
        assert_eq!(fills, json!([]));
        let name = cache.lookup(&[json!("name")]).unwrap();
        assert_eq!(name, json!("Document"));

        assert!(cache.is_loaded());
        assert_eq!(cache.source().loads(), 1);
    }

    #[test]
    fn no_source_is_a_config_error() {
        let mut cache = DocumentCache::new(NoSource);
        let err = cache.lookup(&[json!("x")]).unwrap_err();
        assert!(matches!(err, ThemeError::Config(_)));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        let mut cache = DocumentCache::new(StaticSource::new("{ not json"));
        assert!(matches!(cache.document().unwrap_err(), ThemeError::Json(_)));
    }
}
