//! Platform client error type.

use thiserror::Error;

/// Errors surfaced by [`crate::PlatformClient`] operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The HTTP request itself failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status.
    #[error("platform API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for logging.
        message: String,
    },

    /// The platform asked us to back off.
    #[error("rate limited, retry after {0}s")]
    RateLimited(u64),

    /// A response body failed to deserialize.
    #[error("malformed platform response: {0}")]
    Json(#[from] serde_json::Error),

    /// A privileged call was attempted without a configured service key.
    #[error("operation requires LUXE_PLATFORM_SERVICE_KEY")]
    MissingServiceKey,

    /// A row was expected but the query matched nothing.
    #[error("no row matched the query on {table}")]
    NotFound {
        /// Table the query ran against.
        table: String,
    },
}
