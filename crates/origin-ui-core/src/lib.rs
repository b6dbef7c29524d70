//! # OriginUI Core
//!
//! Shared, WASM-safe logic for the OriginUI MCP server: component records,
//! the in-memory catalog store with its id/tag/category indexes, and the
//! four-tier search algorithm.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Ingestion (turning a remote gallery into records) and the
//! request/response surfaces live in the `origin-ui-mcp` application crate.

pub mod error;
pub mod models;
pub mod search;
pub mod store;

pub use error::CatalogError;
pub use models::{ComponentRecord, Provenance, RegistryFile, SnapshotInfo, Styling};
pub use search::{MatchStrategy, SearchHit};
pub use store::{CatalogStats, CatalogStore};
