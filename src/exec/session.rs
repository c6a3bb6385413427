//! Remote session contract and boundary errors.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for boundary operations.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors crossing the remote-execution boundary.
///
/// Execution failures always propagate to the caller; the boundary never
/// converts a failure into an empty result set.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The store rejected the query text.
    #[error("malformed query: {0}")]
    MalformedQuery(String),

    /// Connectivity to the store was lost mid-operation.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// The store reported a failure executing the query.
    #[error("remote execution failed: {message} (code: {code})")]
    Remote {
        /// Error code from the store.
        code: String,
        /// Error message from the store.
        message: String,
    },

    /// The session was closed before or during the operation.
    #[error("session closed")]
    SessionClosed,

    /// A result object did not match the expected row shape.
    #[error("result shape mismatch: expected {expected} fields, got {got}")]
    RowShape { expected: usize, got: String },
}

impl ExecError {
    /// Create a remote error from a store failure response.
    pub fn remote(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// One live session against a region store.
///
/// Implementations own the wire protocol; the adapter only needs query
/// execution over schema-flexible result objects and explicit teardown.
/// `execute` must be re-invocable per logical query - no implicit caching.
#[async_trait]
pub trait RegionSession: Send + Sync + std::fmt::Debug {
    /// Execute one query and return its result objects.
    async fn execute(&self, oql: &str) -> ExecResult<Vec<serde_json::Value>>;

    /// Release the session's resources. Further `execute` calls fail with
    /// [`ExecError::SessionClosed`].
    async fn close(&self) -> ExecResult<()>;
}
