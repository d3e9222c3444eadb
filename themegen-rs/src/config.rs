//! Design-file fetch configuration.
//!
//! All three parameters are optional on the command line because most theme
//! files never call `get()`. They are validated only when the document is
//! first needed, which is also when the token file is read.

use std::path::{Path, PathBuf};

use crate::error::{Result, ThemeError};

/// Host serving the design-file REST API.
pub const API_HOST: &str = "api.figma.com";

/// Where to fetch the design document from, as given on the command line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FetchConfig {
    /// File holding the API token (`-tokenPath`).
    pub token_path: Option<PathBuf>,
    /// Design file id (`-fileId`).
    pub file_id: Option<String>,
    /// Comma-separated node ids to include (`-nodeIds`).
    pub node_ids: Option<String>,
}

/// A validated fetch: everything needed to issue the request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub host: String,
    pub file_id: String,
    pub node_ids: String,
    pub token: String,
}

impl FetchRequest {
    /// Request target, e.g. `/v1/files/abc?ids=1:2`.
    pub fn path(&self) -> String {
        format!("/v1/files/{}?ids={}", self.file_id, self.node_ids)
    }

    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.path())
    }
}

impl FetchConfig {
    /// Validate the parameters and read the token.
    pub fn request(&self) -> Result<FetchRequest> {
        let file_id = self
            .file_id
            .clone()
            .ok_or_else(|| ThemeError::config("-fileId required"))?;
        let token_path = self
            .token_path
            .as_deref()
            .ok_or_else(|| ThemeError::config("-tokenPath required"))?;
        let node_ids = self
            .node_ids
            .clone()
            .ok_or_else(|| ThemeError::config("-nodeIds required"))?;
        let token = read_token(token_path)?;

        Ok(FetchRequest { host: API_HOST.to_owned(), file_id, node_ids, token })
    }
}

/// Read an API token, trimming the trailing newline editors like to add.
pub fn read_token(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path).map_err(|e| ThemeError::io(path, e))?;
    let token = raw.trim();
    if token.is_empty() {
        return Err(ThemeError::config(format!("token file {} is empty", path.display())));
    }
    Ok(token.to_owned())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
