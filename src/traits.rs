//! Tool extension trait, argument validation, and the response envelope.
//!
//! Every operation the server exposes is a [`Tool`]: a name, a description,
//! a JSON Schema for its parameters, and a synchronous `execute` over one
//! catalog snapshot. Tools are collected in a [`ToolRegistry`] and invoked
//! through the [`QueryRouter`](crate::router::QueryRouter), which is the only
//! place that deals with readiness, missing argument bags and faults.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │              ToolRegistry                │
//! │  ┌──────────────┐ ┌───────────────────┐  │
//! │  │  Built-in    │ │  Custom (Rust)    │  │
//! │  │  catalog     │ │  register(Box<..>)│  │
//! │  │  tools       │ │                   │  │
//! │  └──────────────┘ └───────────────────┘  │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!     QueryRouter::call() → MCP / HTTP / CLI
//! ```
//!
//! # Example
//!
//! ```rust
//! use origin_ui_mcp::error::RouterError;
//! use origin_ui_mcp::traits::{Arguments, Tool, ToolContext, ToolOutput};
//! use origin_ui_core::CatalogStore;
//! use serde_json::{json, Value};
//!
//! pub struct CountTool;
//!
//! impl Tool for CountTool {
//!     fn name(&self) -> &str { "count_components" }
//!     fn description(&self) -> &str { "Count loaded components" }
//!     fn takes_arguments(&self) -> bool { false }
//!
//!     fn parameters_schema(&self, _catalog: &CatalogStore) -> Value {
//!         json!({ "type": "object", "properties": {} })
//!     }
//!
//!     fn execute(&self, _args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError> {
//!         Ok(ToolOutput::text(format!("{} components", ctx.catalog().len())))
//!     }
//! }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

use origin_ui_core::CatalogStore;

use crate::config::Config;
use crate::error::RouterError;

// ═══════════════════════════════════════════════════════════════════════
// Response envelope
// ═══════════════════════════════════════════════════════════════════════

/// One block of a tool response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
    Image { url: String },
}

/// The uniform response of every tool. Always carries at least one text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolOutput {
    pub content: Vec<ContentBlock>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.content.push(ContentBlock::Image { url: url.into() });
        self
    }

    /// The first text block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Image { .. } => None,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arguments
// ═══════════════════════════════════════════════════════════════════════

/// The loosely-typed argument bag received from a transport, with typed
/// accessors that validate as they read.
#[derive(Debug, Clone, Default)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Present, not null.
    fn present(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// A required, non-blank string.
    pub fn required_str(&self, name: &str) -> Result<&str, RouterError> {
        match self.present(name) {
            None => Err(RouterError::MissingArgument(name.to_string())),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(RouterError::MissingArgument(name.to_string()))
            }
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(RouterError::invalid(
                name,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    /// An optional string; blank counts as absent.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, RouterError> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(RouterError::invalid(
                name,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    /// An optional integer, `default` when absent.
    ///
    /// Whole-valued floats (`10.0`) are accepted since many clients send
    /// every number as a double. The sign is not checked here; the store
    /// rejects negative limits.
    pub fn optional_int(&self, name: &str, default: i64) -> Result<i64, RouterError> {
        let Some(value) = self.present(name) else {
            return Ok(default);
        };
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                        _ => Err(RouterError::invalid(
                            name,
                            format!("expected an integer, got {}", n),
                        )),
                    }
                }
            }
            other => Err(RouterError::invalid(
                name,
                format!("expected an integer, got {}", type_name(other)),
            )),
        }
    }

    /// An optional string restricted to `allowed`, `default` when absent.
    pub fn optional_choice<'a>(
        &'a self,
        name: &str,
        allowed: &[&'a str],
        default: &'a str,
    ) -> Result<&'a str, RouterError> {
        match self.optional_str(name)? {
            None => Ok(default),
            Some(v) => allowed.iter().copied().find(|a| *a == v).ok_or_else(|| {
                RouterError::invalid(name, format!("must be one of: {}", allowed.join(", ")))
            }),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tool trait and context
// ═══════════════════════════════════════════════════════════════════════

/// Everything a tool may read while executing: one catalog snapshot and the
/// application config. Created by the router for each call.
pub struct ToolContext {
    catalog: Arc<CatalogStore>,
    config: Arc<Config>,
}

impl ToolContext {
    pub fn new(catalog: Arc<CatalogStore>, config: Arc<Config>) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// A named operation exposed over MCP, the HTTP API and the CLI.
pub trait Tool: Send + Sync {
    /// Lowercase identifier with underscores (e.g. `"search_components"`).
    fn name(&self) -> &str;

    /// One-line description for client discovery.
    fn description(&self) -> &str;

    /// Whether the tool declares parameters. Tools that don't accept a
    /// request without an argument bag.
    fn takes_arguments(&self) -> bool {
        true
    }

    /// JSON Schema (`type: "object"`) for the parameters. Receives the
    /// active snapshot so enums can list the loaded categories.
    fn parameters_schema(&self, catalog: &CatalogStore) -> Value;

    fn execute(&self, args: &Arguments, ctx: &ToolContext) -> Result<ToolOutput, RouterError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Tool descriptor as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Ordered collection of tools, looked up by name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// A registry holding every built-in catalog tool.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for tool in crate::tools::builtins() {
            registry.register(tool);
        }
        registry
    }

    /// Register a tool. A later tool with the same name shadows nothing:
    /// lookups return the first registration.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    /// Descriptors for every tool, schemas rendered against `catalog`.
    pub fn describe(&self, catalog: &CatalogStore) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(catalog),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => Arguments::new(map),
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_required_str() {
        let a = args(json!({ "query": "button", "blank": "  ", "num": 3, "nil": null }));
        assert_eq!(a.required_str("query").unwrap(), "button");
        assert_eq!(
            a.required_str("missing").unwrap_err(),
            RouterError::MissingArgument("missing".to_string())
        );
        assert_eq!(
            a.required_str("blank").unwrap_err(),
            RouterError::MissingArgument("blank".to_string())
        );
        assert_eq!(
            a.required_str("nil").unwrap_err(),
            RouterError::MissingArgument("nil".to_string())
        );
        assert_eq!(a.required_str("num").unwrap_err().code(), "invalid_argument");
    }

    #[test]
    fn test_optional_str() {
        let a = args(json!({ "category": "input", "empty": "", "flag": true }));
        assert_eq!(a.optional_str("category").unwrap(), Some("input"));
        assert_eq!(a.optional_str("empty").unwrap(), None);
        assert_eq!(a.optional_str("absent").unwrap(), None);
        assert!(a.optional_str("flag").is_err());
    }

    #[test]
    fn test_optional_int() {
        let a = args(json!({ "a": 5, "b": 7.0, "c": 2.5, "d": "10", "e": -1 }));
        assert_eq!(a.optional_int("a", 10).unwrap(), 5);
        assert_eq!(a.optional_int("b", 10).unwrap(), 7);
        assert_eq!(a.optional_int("absent", 10).unwrap(), 10);
        assert_eq!(a.optional_int("e", 10).unwrap(), -1);
        assert!(a.optional_int("c", 10).is_err());
        let err = a.optional_int("d", 10).unwrap_err();
        assert_eq!(
            err,
            RouterError::invalid("d", "expected an integer, got a string")
        );
    }

    #[test]
    fn test_optional_choice() {
        let a = args(json!({ "theme": "dark", "bad": "sepia" }));
        let allowed = ["light", "dark", "both"];
        assert_eq!(a.optional_choice("theme", &allowed, "both").unwrap(), "dark");
        assert_eq!(a.optional_choice("absent", &allowed, "both").unwrap(), "both");
        let err = a.optional_choice("bad", &allowed, "both").unwrap_err();
        assert!(err.to_string().contains("light, dark, both"));
    }

    #[test]
    fn test_envelope_serializes_typed_blocks() {
        let out = ToolOutput::text("hello").with_image("https://example.com/a.png");
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "content": [
                    { "type": "text", "text": "hello" },
                    { "type": "image", "url": "https://example.com/a.png" }
                ]
            })
        );
        assert_eq!(out.first_text(), Some("hello"));
    }

    #[test]
    fn test_builtin_registry_lookup() {
        let registry = ToolRegistry::with_builtins();
        assert_eq!(registry.len(), 7);
        for name in [
            "search_components",
            "get_component_details",
            "list_components",
            "get_install_command",
            "get_registry_stats",
            "get_component_preview",
            "get_component_screenshot",
        ] {
            assert!(registry.find(name).is_some(), "missing builtin {}", name);
        }
        assert!(registry.find("nope").is_none());
    }
}
