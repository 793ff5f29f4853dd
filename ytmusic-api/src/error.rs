//! Error types for the YouTube Music API client.
//!
//! Only transport and decoding failures are errors. A response that decodes
//! as JSON but is missing the expected renderers is *not* an error: the
//! parsers degrade to empty values instead (see [`parse`](crate::parse)).

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the YouTube Music API.
#[derive(Debug, Error)]
pub enum YtMusicError {
    /// No `__Secure-3PAPISID` / `SAPISID` cookie is available.
    ///
    /// The client never returns this itself; it is raised by
    /// [`AuthContext::require`](crate::auth::AuthContext::require) for callers
    /// that gate privileged operations on login state.
    #[error("not logged in")]
    NotLoggedIn,

    /// The request did not complete within the configured timeout.
    /// The in-flight connection has been dropped.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// HTTP transport error (DNS, connection reset, TLS failure, etc.).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success HTTP status.
    ///
    /// Common statuses:
    /// - `401` — cookies expired or `SAPISIDHASH` rejected
    /// - `400` — malformed context / unknown browse id
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the JSON error envelope, or a truncated body.
        message: String,
    },

    /// The response body was not valid JSON.
    ///
    /// `snippet` holds at most the first 200 characters of the body.
    #[error("JSON parse error: {snippet}")]
    Parse {
        /// Truncated prefix of the offending body.
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error (cookie jar read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize the cookie jar.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catch-all for other errors (e.g. missing config directory).
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for `Result<T, YtMusicError>`.
pub type Result<T> = std::result::Result<T, YtMusicError>;
