//! # origin-ui-mcp
//!
//! An MCP server over the OriginUI component registry.
//!
//! The registry file is loaded into an in-memory catalog (see the
//! `origin-ui-core` crate), and a small set of tools answers searches,
//! listings, details and install commands against it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ CatalogSource│──▶│ SharedCatalog│──▶│ QueryRouter  │
//! │ registry.json│   │ Arc snapshot │   │ ToolRegistry │
//! └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                              │
//!                      ┌───────────────────────┼──────────────┐
//!                      ▼                       ▼              ▼
//!                 ┌──────────┐          ┌────────────┐   ┌──────────┐
//!                 │   CLI    │          │ MCP stdio/ │   │ JSON API │
//!                 │          │          │ HTTP /mcp  │   │ /tools/* │
//!                 └──────────┘          └────────────┘   └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | Catalog sources (registry file, static lists) |
//! | [`catalog`] | Shared snapshot handle with atomic swap |
//! | [`traits`] | `Tool` trait, argument validation, response envelope |
//! | [`tools`] | Built-in catalog tools |
//! | [`render`] | Text rendering of results |
//! | [`router`] | Query router and its state machine |
//! | [`error`] | Router error taxonomy |
//! | [`mcp`] | MCP protocol bridge |
//! | [`server`] | stdio and HTTP serving |
//! | [`commands`] | CLI commands |
//! | [`logging`] | Tracing setup |

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod render;
pub mod router;
pub mod server;
pub mod sources;
pub mod tools;
pub mod traits;
