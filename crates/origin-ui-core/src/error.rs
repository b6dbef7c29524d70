//! Errors raised by the catalog store.

use thiserror::Error;

/// Failure modes of [`CatalogStore`](crate::store::CatalogStore).
///
/// "Not found" is deliberately absent: an unknown id or category is a normal
/// outcome and is reported as `None` or an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two records in one load share an id. The load is rejected as a whole.
    #[error("duplicate component id: {id}")]
    DuplicateId { id: String },

    /// A structurally valid but illegal argument, e.g. a negative limit.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },
}

impl CatalogError {
    pub(crate) fn negative_limit(limit: i64) -> Self {
        CatalogError::InvalidArgument {
            argument: "limit".to_string(),
            reason: format!("must be >= 0, got {}", limit),
        }
    }
}
