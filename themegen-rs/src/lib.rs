//! themegen: compiles a JSON theme document into TypeScript declarations.
//!
//! Each theme group may `@extend` an earlier group, reference sibling
//! properties with `{name}`, and compute values with `=get(...)`, `=hex(...)`
//! and `=math(...)`. `get()` reads nodes from an external design document
//! that is downloaded at most once per run.

pub mod cli;
pub mod config;
pub mod design;
pub mod emit;
pub mod error;
pub mod eval;
pub mod theme;

pub use error::{Result, ThemeError};

use cli::CliArgs;
use design::{DocumentSource, RemoteSource};
use theme::{resolve_document, ThemeDocument};

/// Load, resolve and render the theme file named by `args`.
pub fn convert(args: &CliArgs) -> Result<String> {
    convert_with(args, RemoteSource::new(args.fetch.clone()))
}

/// [`convert`] with an explicit design-document source.
pub fn convert_with<S: DocumentSource>(args: &CliArgs, source: S) -> Result<String> {
    let doc = ThemeDocument::load(&args.theme_file)?;
    tracing::info!(themes = doc.len(), file = %args.theme_file.display(), "loaded theme document");
    let themes = resolve_document(&doc, source)?;
    emit::render(&args.inf_name, &themes)
}
