//! `opsgrid-io` — grid acquisition: CSV import, sources, snapshot cache.

pub mod cache;
pub mod csv;
pub mod source;

pub use cache::CachedSource;
pub use source::{FileSource, GridSource, SourceError};
