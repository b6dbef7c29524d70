//! MCP JSON-RPC protocol bridge.
//!
//! Adapts the [`QueryRouter`] to the MCP tool protocol. The same bridge is
//! served over stdio (`origin-ui-mcp serve`) and mounted as a Streamable
//! HTTP endpoint at `/mcp` (`origin-ui-mcp serve --transport http`).
//!
//! Router errors are reported through the JSON-RPC error channel; a "not
//! found" component is an ordinary successful tool result.

use std::borrow::Cow;
use std::sync::Arc;

use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler};

use crate::error::RouterError;
use crate::router::QueryRouter;
use crate::traits::{ContentBlock, ToolInfo, ToolOutput};

/// Bridges the query router to the MCP protocol.
///
/// Each MCP session receives a clone of this struct; all sessions share one
/// router and therefore one catalog snapshot handle.
#[derive(Clone)]
pub struct McpBridge {
    router: Arc<QueryRouter>,
}

impl McpBridge {
    pub fn new(router: Arc<QueryRouter>) -> Self {
        Self { router }
    }

    fn to_mcp_tool(info: ToolInfo) -> Tool {
        let input_schema = match info.parameters {
            serde_json::Value::Object(map) => Arc::new(map),
            _ => Arc::new(serde_json::Map::new()),
        };

        Tool {
            name: Cow::Owned(info.name),
            title: None,
            description: Some(Cow::Owned(info.description)),
            input_schema,
            output_schema: None,
            annotations: Some(ToolAnnotations::new().read_only(true)),
            execution: None,
            icons: None,
            meta: None,
        }
    }
}

/// Map a router error onto the JSON-RPC error codes.
pub fn to_mcp_error(err: &RouterError) -> McpError {
    let code = match err {
        RouterError::MissingArgument(_) | RouterError::InvalidArgument { .. } => {
            ErrorCode::INVALID_PARAMS
        }
        RouterError::InvalidRequest(_) => ErrorCode::INVALID_REQUEST,
        RouterError::MethodNotFound(_) => ErrorCode::METHOD_NOT_FOUND,
        RouterError::ServiceNotReady | RouterError::Internal { .. } => ErrorCode::INTERNAL_ERROR,
    };
    McpError::new(
        code,
        err.to_string(),
        Some(serde_json::json!({ "code": err.code() })),
    )
}

/// Image blocks carry a URL only; MCP image content wants inline bytes, so
/// the URL is passed on as a markdown image.
fn to_mcp_content(output: ToolOutput) -> Vec<Content> {
    output
        .content
        .into_iter()
        .map(|block| match block {
            ContentBlock::Text { text } => Content::text(text),
            ContentBlock::Image { url } => Content::text(format!("![preview]({})", url)),
        })
        .collect()
}

impl ServerHandler for McpBridge {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "origin-ui-mcp".to_string(),
                title: Some("OriginUI Components".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: None,
                icons: None,
                website_url: Some(self.router.config().tools.site_url.clone()),
            },
            instructions: Some(
                "Browse the OriginUI component registry. Use search_components to find \
                 components by tag, name or category, get_component_details for one \
                 component, and get_install_command for the shadcn install line."
                    .to_string(),
            ),
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools: Vec<Tool> = self
            .router
            .describe_tools()
            .into_iter()
            .map(Self::to_mcp_tool)
            .collect();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn get_tool(&self, name: &str) -> Option<Tool> {
        self.router
            .describe_tools()
            .into_iter()
            .find(|t| t.name == name)
            .map(Self::to_mcp_tool)
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        match self.router.call(&request.name, request.arguments) {
            Ok(output) => Ok(CallToolResult::success(to_mcp_content(output))),
            Err(e) => Err(to_mcp_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let cases = [
            (RouterError::MissingArgument("query".into()), ErrorCode::INVALID_PARAMS),
            (RouterError::invalid("limit", "must be >= 0"), ErrorCode::INVALID_PARAMS),
            (RouterError::InvalidRequest("Missing arguments".into()), ErrorCode::INVALID_REQUEST),
            (RouterError::MethodNotFound("nope".into()), ErrorCode::METHOD_NOT_FOUND),
            (RouterError::ServiceNotReady, ErrorCode::INTERNAL_ERROR),
            (
                RouterError::Internal {
                    operation: "x".into(),
                    cause: "y".into(),
                },
                ErrorCode::INTERNAL_ERROR,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(to_mcp_error(&err).code, code, "{:?}", err);
        }
    }

    #[test]
    fn test_image_blocks_become_markdown() {
        let out = ToolOutput::text("shot").with_image("https://cdn.example.com/a.png");
        let content = to_mcp_content(out);
        assert_eq!(content.len(), 2);
        assert_eq!(
            content[1].as_text().map(|t| t.text.as_str()),
            Some("![preview](https://cdn.example.com/a.png)")
        );
    }
}
