//! Command-line argument parsing.
//!
//! Usage:
//!   themegen -themeFile <path> -infName <name>
//!            [-tokenPath <path> -fileId <id> -nodeIds <ids>] [-out <path>]
//!
//! Flag names are case-insensitive; every flag except `-help` takes the
//! next argument as its value.

use std::path::PathBuf;

use crate::config::FetchConfig;
use crate::error::{Result, ThemeError};

pub const USAGE: &str = "\
Usage: themegen -themeFile <path> -infName <name>
                [-tokenPath <path> -fileId <id> -nodeIds <ids>] [-out <path>]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    /// Theme document to convert (`-themeFile`).
    pub theme_file: PathBuf,
    /// Name of the generated interface (`-infName`).
    pub inf_name: String,
    /// Design-document fetch parameters (`-tokenPath`, `-fileId`, `-nodeIds`).
    pub fetch: FetchConfig,
    /// Output file; stdout when absent (`-out`).
    pub out: Option<PathBuf>,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// `-h` / `-help`: print usage and exit.
    Help,
    Convert(CliArgs),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()`.
pub fn parse_args() -> Result<Invocation> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(raw.get(1..).unwrap_or_default())
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<Invocation> {
    let mut theme_file: Option<PathBuf> = None;
    let mut inf_name: Option<String> = None;
    let mut fetch = FetchConfig::default();
    let mut out: Option<PathBuf> = None;

    let mut i = 0;
    while i < argv.len() {
        let flag = argv[i].as_str();
        let lower = flag.to_ascii_lowercase();

        if matches!(lower.as_str(), "-h" | "-help" | "--help") {
            return Ok(Invocation::Help);
        }
        if !flag.starts_with('-') {
            return Err(ThemeError::config(format!("unexpected argument: {flag}")));
        }

        let value = || {
            argv.get(i + 1)
                .cloned()
                .ok_or_else(|| ThemeError::config(format!("{flag} requires a value")))
        };
        match lower.as_str() {
            "-themefile" => theme_file = Some(PathBuf::from(value()?)),
            "-infname" => inf_name = Some(value()?),
            "-tokenpath" => fetch.token_path = Some(PathBuf::from(value()?)),
            "-fileid" => fetch.file_id = Some(value()?),
            "-nodeids" => fetch.node_ids = Some(value()?),
            "-out" => out = Some(PathBuf::from(value()?)),
            _ => return Err(ThemeError::config(format!("unknown option: {flag}"))),
        }
        i += 2;
    }

    let theme_file = theme_file.ok_or_else(|| ThemeError::config("-themeFile required"))?;
    let inf_name = inf_name.ok_or_else(|| ThemeError::config("-infName required"))?;

    Ok(Invocation::Convert(CliArgs { theme_file, inf_name, fetch, out }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
