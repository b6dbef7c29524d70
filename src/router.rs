//! Query router: the single entry point for every transport.
//!
//! A call goes through four gates, in order:
//!
//! 1. the tool name must be registered (`MethodNotFound`),
//! 2. the catalog must be loaded (`ServiceNotReady`),
//! 3. tools that declare parameters need an argument bag (`InvalidRequest`),
//! 4. the tool runs against one snapshot; a panic is caught and reported as
//!    `Internal`.
//!
//! The router never retries. It holds the catalog through a
//! [`SharedCatalog`], so a reload swaps the snapshot without disturbing calls
//! already in flight.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value};

use crate::catalog::{LoadSummary, SharedCatalog};
use crate::config::Config;
use crate::error::RouterError;
use crate::sources::CatalogSource;
use crate::traits::{Arguments, ToolContext, ToolInfo, ToolOutput, ToolRegistry};

/// Lifecycle of a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// No catalog snapshot yet; every call fails with `ServiceNotReady`.
    Uninitialized,
    Ready,
}

pub struct QueryRouter {
    catalog: Arc<SharedCatalog>,
    config: Arc<Config>,
    tools: ToolRegistry,
}

impl QueryRouter {
    /// A router over the built-in tools with an empty, unloaded catalog.
    pub fn new(config: Config) -> Self {
        Self::with_tools(config, ToolRegistry::with_builtins())
    }

    pub fn with_tools(config: Config, tools: ToolRegistry) -> Self {
        Self {
            catalog: Arc::new(SharedCatalog::new()),
            config: Arc::new(config),
            tools,
        }
    }

    pub fn state(&self) -> RouterState {
        if self.catalog.snapshot().is_loaded() {
            RouterState::Ready
        } else {
            RouterState::Uninitialized
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    /// Load the first snapshot. On failure the router stays `Uninitialized`.
    pub fn initialize(&self, source: &dyn CatalogSource) -> Result<LoadSummary> {
        match self.catalog.rebuild_from(source) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                let origin = source.describe();
                tracing::error!(source = %origin, "catalog initialization failed: {:#}", e);
                Err(e)
            }
        }
    }

    /// Replace the snapshot. On failure the current snapshot stays active.
    pub fn reload(&self, source: &dyn CatalogSource) -> Result<LoadSummary> {
        match self.catalog.rebuild_from(source) {
            Ok(summary) => Ok(summary),
            Err(e) => {
                let origin = source.describe();
                tracing::warn!(source = %origin, "catalog reload failed, keeping current snapshot: {:#}", e);
                Err(e)
            }
        }
    }

    /// Tool descriptors with schemas rendered against the current snapshot.
    pub fn describe_tools(&self) -> Vec<ToolInfo> {
        self.tools.describe(&self.catalog.snapshot())
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Dispatch one named operation.
    pub fn call(
        &self,
        name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<ToolOutput, RouterError> {
        let tool = self
            .tools
            .find(name)
            .ok_or_else(|| RouterError::MethodNotFound(name.to_string()))?;

        let snapshot = self.catalog.snapshot();
        if !snapshot.is_loaded() {
            tracing::warn!(tool = name, "call rejected: catalog not loaded");
            return Err(RouterError::ServiceNotReady);
        }

        let args = match arguments {
            Some(map) => Arguments::new(map),
            None if tool.takes_arguments() => {
                return Err(RouterError::InvalidRequest("Missing arguments".to_string()));
            }
            None => Arguments::default(),
        };

        tracing::debug!(tool = name, "dispatching tool call");
        let ctx = ToolContext::new(snapshot, self.config.clone());

        match catch_unwind(AssertUnwindSafe(|| tool.execute(&args, &ctx))) {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(err)) => {
                if err.is_client_error() {
                    tracing::warn!(tool = name, code = err.code(), "{}", err);
                } else {
                    tracing::error!(tool = name, code = err.code(), "{}", err);
                }
                Err(err)
            }
            Err(panic) => {
                let cause = panic_message(panic.as_ref());
                tracing::error!(tool = name, cause = %cause, "tool panicked");
                Err(RouterError::Internal {
                    operation: name.to_string(),
                    cause,
                })
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
