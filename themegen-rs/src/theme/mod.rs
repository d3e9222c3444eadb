//! Theme documents and their resolution.

pub mod document;
pub mod resolve;

pub use document::{is_directive, ThemeDocument, ThemeGroup, EXTEND_KEY, NAME_KEY};
pub use resolve::{resolve_document, ResolvedTheme, Resolver};
