use thiserror::Error;

/// Failure of a single request against the storage API.
///
/// None of these ever escape the widget: the browser state turns them into an
/// empty listing or the content placeholder and keeps the error around for
/// display.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout imposed by the host, ...).
    #[error("Network error: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Numeric HTTP status code.
        status: u16,
        /// Response body as text, possibly empty.
        body: String,
    },
    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),
    /// The request was rejected before it was sent.
    #[error("Invalid input on field '{field}': {message}")]
    InvalidInput {
        /// The name of the offending argument.
        field: String,
        /// A message describing the problem.
        message: String,
    },
}

impl FetchError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        FetchError::InvalidInput { field: field.to_string(), message: message.into() }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => FetchError::Status { status: status.as_u16(), body: String::new() },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, FetchError>`.
pub type FetchResult<T> = Result<T, FetchError>;

/// Argument checks applied before a request is issued.
pub mod validation {
    use super::*;

    /// Backend identifiers are path segments of the listing URL, so they must be non-empty.
    pub fn validate_backend(backend: &str) -> FetchResult<()> {
        if backend.trim().is_empty() {
            return Err(FetchError::invalid("backend", "Backend identifier cannot be empty"));
        }
        if backend.contains('\0') {
            return Err(FetchError::invalid("backend", "Backend identifier contains null characters"));
        }
        Ok(())
    }

    pub fn validate_path(path: &str) -> FetchResult<()> {
        if path.contains('\0') {
            return Err(FetchError::invalid("path", "Path contains null characters"));
        }
        Ok(())
    }
}
