//! The external design document: fetching, caching, and path lookup.
//!
//! Only `get()` needs the document, so it is fetched lazily through a
//! [`DocumentCache`] owned by the resolver. Sources:
//!
//! - [`RemoteSource`]: HTTPS download from the design-file API
//! - [`StaticSource`]: a fixed JSON text
//! - [`NoSource`]: no document; any `get()` is a configuration error

pub mod cache;
pub mod fetch;
pub mod navigator;

pub use cache::{DocumentCache, DocumentSource, NoSource, StaticSource};
pub use fetch::RemoteSource;
pub use navigator::{find_node, navigate};
