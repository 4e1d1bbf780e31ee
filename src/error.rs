//! Consolidated error types for the catalog-mcp library.
//!
//! Catalog file failures are recoverable by design: the loader absorbs
//! them per file and degrades to "no items". The variants here exist so
//! the per-file attempt has a typed failure to log before it is dropped.
//! The binary crate (`main.rs`) uses `anyhow` for the serve path.

use std::path::PathBuf;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for catalog-mcp library operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
