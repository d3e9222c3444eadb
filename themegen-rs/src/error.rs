//! Error type shared by every stage of a themegen run.
//!
//! Every failure is fatal for the run: the resolver never retries and never
//! emits partial output, so errors carry only a message (plus the underlying
//! source where there is one) and bubble straight up to `main`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// Malformed theme document, expression, or design-document path.
    #[error("{0}")]
    Format(String),

    /// A required parameter was not supplied.
    #[error("{0}")]
    Config(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The design document could not be retrieved.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThemeError {
    pub fn format(msg: impl Into<String>) -> Self {
        ThemeError::Format(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ThemeError::Config(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ThemeError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, ThemeError>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_is_bare() {
        let err = ThemeError::format("No themes defined");
        assert_eq!(err.to_string(), "No themes defined");
    }

    #[test]
    fn io_error_names_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ThemeError::io("/tmp/theme.json", io);
        assert!(matches!(err, ThemeError::Io { .. }));
        assert_eq!(err.to_string(), "/tmp/theme.json: file not found");
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ThemeError = json_err.into();
        assert!(matches!(err, ThemeError::Json(_)));
        assert!(err.to_string().starts_with("invalid JSON:"));
    }

    #[test]
    fn fetch_error_display() {
        let err = ThemeError::Fetch("HTTP 403 Forbidden".into());
        assert_eq!(err.to_string(), "fetch failed: HTTP 403 Forbidden");
    }
}
