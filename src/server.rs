//! Serving the catalog: MCP over stdio, or MCP plus a JSON API over HTTP.
//!
//! # Endpoints (`--transport http`)
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Status, version and router state |
//! | `GET`  | `/tools/list` | Registered tools with JSON schemas |
//! | `POST` | `/tools/{name}` | Call a tool; body is the argument object |
//! | any    | `/mcp` | MCP Streamable HTTP endpoint |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "missing_argument", "message": "missing required argument: query" } }
//! ```
//!
//! | Code | Status |
//! |------|--------|
//! | `missing_argument`, `invalid_argument`, `invalid_request` | 400 |
//! | `method_not_found` | 404 |
//! | `not_ready` | 503 |
//! | `internal` | 500 |
//!
//! # MCP client configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "origin-ui": {
//!       "command": "origin-ui-mcp",
//!       "args": ["--config", "/path/to/origin-ui.toml", "serve"]
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use rmcp::ServiceExt;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::RouterError;
use crate::mcp::McpBridge;
use crate::router::{QueryRouter, RouterState};
use crate::sources::RegistryFileSource;
use crate::traits::{ToolInfo, ToolOutput};

/// How `serve` talks to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Transport {
    /// MCP over stdin/stdout.
    Stdio,
    /// MCP at `/mcp` plus the JSON API, on `[server].bind`.
    Http,
}

/// Build the router, load the registry and serve until the transport closes.
///
/// A registry that fails to load does not stop the server: the router stays
/// uninitialized and answers every call with `not_ready` until a periodic
/// reload succeeds.
pub async fn serve(config: Config, transport: Transport) -> anyhow::Result<()> {
    let source = Arc::new(RegistryFileSource::new(config.registry.candidates()));
    let reload_every = config.registry.reload_interval_secs;
    let bind = config.server.bind.clone();

    let router = Arc::new(QueryRouter::new(config));
    if let Err(e) = router.initialize(source.as_ref()) {
        tracing::error!("serving without a catalog: {:#}", e);
    }

    if let Some(secs) = reload_every {
        spawn_reload(router.clone(), source, Duration::from_secs(secs));
    }

    match transport {
        Transport::Stdio => run_stdio(router).await,
        Transport::Http => run_http(router, &bind).await,
    }
}

/// Re-read the registry on `period`, swapping the snapshot on success.
pub fn spawn_reload(
    router: Arc<QueryRouter>,
    source: Arc<RegistryFileSource>,
    period: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick fires immediately; startup already loaded.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let router = router.clone();
            let source = source.clone();
            let result =
                tokio::task::spawn_blocking(move || router.reload(source.as_ref())).await;
            if let Err(e) = result {
                tracing::error!("reload task failed: {}", e);
            }
        }
    })
}

pub async fn run_stdio(router: Arc<QueryRouter>) -> anyhow::Result<()> {
    tracing::info!("MCP server listening on stdio");
    let service = McpBridge::new(router).serve(stdio()).await?;
    service.waiting().await?;
    tracing::info!("MCP stdio session closed");
    Ok(())
}

pub async fn run_http(router: Arc<QueryRouter>, bind: &str) -> anyhow::Result<()> {
    let app = app(router);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(bind = %bind, "HTTP server listening (MCP at /mcp)");
    axum::serve(listener, app).await?;
    Ok(())
}

/// The full HTTP application: JSON API routes plus the MCP endpoint.
pub fn app(router: Arc<QueryRouter>) -> Router {
    let bridge = McpBridge::new(router.clone());
    let mcp_service = StreamableHttpService::new(
        move || Ok(bridge.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .nest_service("/mcp", mcp_service)
        .layer(cors)
        .with_state(router)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<RouterError> for AppError {
    fn from(err: RouterError) -> Self {
        let status = match err {
            RouterError::MissingArgument(_)
            | RouterError::InvalidArgument { .. }
            | RouterError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            RouterError::MethodNotFound(_) => StatusCode::NOT_FOUND,
            RouterError::ServiceNotReady => StatusCode::SERVICE_UNAVAILABLE,
            RouterError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "invalid_request".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    /// `"ready"` or `"uninitialized"`.
    state: String,
    components: usize,
}

async fn handle_health(State(router): State<Arc<QueryRouter>>) -> Json<HealthResponse> {
    let state = match router.state() {
        RouterState::Ready => "ready",
        RouterState::Uninitialized => "uninitialized",
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        state: state.to_string(),
        components: router.catalog().snapshot().len(),
    })
}

// ============ GET /tools/list ============

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

async fn handle_list_tools(State(router): State<Arc<QueryRouter>>) -> Json<ToolListResponse> {
    Json(ToolListResponse {
        tools: router.describe_tools(),
    })
}

// ============ POST /tools/{name} ============

/// An empty body means "no argument bag"; otherwise it must be a JSON object.
async fn handle_tool_call(
    State(router): State<Arc<QueryRouter>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolOutput>, AppError> {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(map)) => Some(map),
            Ok(Value::Null) => None,
            Ok(_) => return Err(bad_request("request body must be a JSON object")),
            Err(e) => return Err(bad_request(format!("invalid JSON body: {}", e))),
        }
    };

    let output = router.call(&name, arguments)?;
    Ok(Json(output))
}
