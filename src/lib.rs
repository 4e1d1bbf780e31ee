//! catalog-mcp: a catalog search MCP server.
//!
//! This library provides the core functionality: loading a JSON catalog
//! from disk, the search/sort pipeline over it, and the MCP tool and
//! widget resource built on top. The binary crate adds the CLI (clap)
//! and the stdio transport.

pub mod catalog;
pub mod error;
pub mod search;
pub mod server;
pub mod widget;
