//! Design-document download over HTTPS.
//!
//! [`RemoteSource`] is the production [`DocumentSource`]: on first use it
//! validates the [`FetchConfig`], reads the token, and performs a single
//! `GET /v1/files/{id}?ids={nodes}` against the API host with an async
//! `reqwest` client (rustls, gzip).
//!
//! Evaluation itself is synchronous, so the fetch runs on a current-thread
//! runtime built on demand and driven with `block_on`. Ctrl-C while the
//! request is pending cancels it.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use super::cache::DocumentSource;
use crate::config::FetchConfig;
use crate::error::{Result, ThemeError};

/// Header carrying the API token.
pub const TOKEN_HEADER: &str = "X-FIGMA-TOKEN";

const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

// ── Client ────────────────────────────────────────────────────────────────

fn client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("themegen/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| ThemeError::Fetch(format!("cannot create HTTP client: {e}")))
}

/// GET `url` with the API token and return the response body.
///
/// Non-2xx statuses are errors carrying the status and the start of the
/// body (the API reports the reason there).
pub async fn fetch(url: &str, token: &str) -> Result<String> {
    let response = client()?
        .get(url)
        .header(TOKEN_HEADER, token)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ThemeError::Fetch(format!("{url}: {e}")))?;

    let status = response.status();
    debug!(status = %status, "response received");
    let body = response
        .text()
        .await
        .map_err(|e| ThemeError::Fetch(format!("reading response from {url}: {e}")))?;

    if !status.is_success() {
        let snippet: String = body.chars().take(200).collect();
        return Err(ThemeError::Fetch(format!("{status}: {snippet}")));
    }
    Ok(body)
}

/// Run [`fetch`], aborting early on Ctrl-C.
async fn fetch_cancellable(url: &str, token: &str) -> Result<String> {
    tokio::select! {
        res = fetch(url, token) => res,
        Ok(()) = tokio::signal::ctrl_c() => Err(ThemeError::Fetch("cancelled".into())),
    }
}

// ── RemoteSource ──────────────────────────────────────────────────────────

/// Downloads the design document described by a [`FetchConfig`].
#[derive(Debug, Clone)]
pub struct RemoteSource {
    config: FetchConfig,
}

impl RemoteSource {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

impl DocumentSource for RemoteSource {
    fn load(&mut self) -> Result<String> {
        let req = self.config.request()?;
        let url = req.url();
        info!("GET {url}");

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ThemeError::Fetch(format!("cannot start I/O runtime: {e}")))?;
        let body = runtime.block_on(fetch_cancellable(&url, &req.token))?;

        info!("Design file length {}KB", body.len() / 1000);
        Ok(body)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
