//! Error types for remote AI capability calls.

use thiserror::Error;

/// Errors that can occur talking to the remote AI backend.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The backend answered but reported failure for this operation
    #[error("{endpoint} rejected the request: {message}")]
    Rejected {
        /// Operation that was rejected
        endpoint: &'static str,
        /// Server-supplied failure message
        message: String,
    },

    /// Non-success HTTP status
    #[error("API error: status {status}, {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Transport-level failure (connection, TLS, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("failed to parse {endpoint} response: {message}")]
    Parse {
        /// Operation whose response failed to parse
        endpoint: &'static str,
        /// Decoder error message
        message: String,
    },
}

/// Result type alias for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Map the wire-level `success` flag into the error taxonomy.
///
/// Every capability response carries `{success, message?}`; a `false`
/// flag becomes [`RemoteError::Rejected`] with the server-supplied
/// message preserved.
pub fn check_success(endpoint: &'static str, success: bool, message: Option<String>) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(RemoteError::Rejected {
            endpoint,
            message: message.unwrap_or_else(|| "remote service reported failure".to_string()),
        })
    }
}
