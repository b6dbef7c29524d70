//! Request-level errors raised by the query router.
//!
//! "Component not found" is not an error: tools answer it with a successful
//! response carrying a friendly message. Everything here is reported to the
//! caller through the transport's error channel.

use origin_ui_core::CatalogError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A required argument is absent or blank.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// An argument is present but unusable (wrong type, negative limit, ...).
    #[error("invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// The catalog has not finished loading.
    #[error("service not ready: the component catalog has not been loaded")]
    ServiceNotReady,

    /// The request itself is malformed, e.g. the argument bag is missing.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unknown tool: {0}")]
    MethodNotFound(String),

    /// Any other fault while serving an operation.
    #[error("error executing tool {operation}: {cause}")]
    Internal { operation: String, cause: String },
}

impl RouterError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RouterError::MissingArgument(_) => "missing_argument",
            RouterError::InvalidArgument { .. } => "invalid_argument",
            RouterError::ServiceNotReady => "not_ready",
            RouterError::InvalidRequest(_) => "invalid_request",
            RouterError::MethodNotFound(_) => "method_not_found",
            RouterError::Internal { .. } => "internal",
        }
    }

    pub fn invalid(argument: &str, message: impl Into<String>) -> Self {
        RouterError::InvalidArgument {
            argument: argument.to_string(),
            message: message.into(),
        }
    }

    /// Map a store failure raised while serving `operation`.
    pub fn from_catalog(operation: &str, err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidArgument { argument, reason } => RouterError::InvalidArgument {
                argument,
                message: reason,
            },
            other => RouterError::Internal {
                operation: operation.to_string(),
                cause: other.to_string(),
            },
        }
    }

    /// True for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RouterError::MissingArgument(_)
                | RouterError::InvalidArgument { .. }
                | RouterError::InvalidRequest(_)
                | RouterError::MethodNotFound(_)
        )
    }
}
