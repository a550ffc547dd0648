/// Errors that can occur when talking to the Command Center API.
///
/// # Examples
///
/// ```rust
/// use zadara_client::error::{ClientError, ErrorKind};
///
/// let err = ClientError::Api {
///     status: 404,
///     message: "cloud not found".to_string(),
/// };
/// assert_eq!(err.kind(), ErrorKind::Api);
/// assert!(err.to_string().contains("cloud not found"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL could not be parsed or cannot carry a path.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The API token contains bytes that are not allowed in a header value.
    #[error("invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    /// Connection, TLS or timeout failure from `reqwest`.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON document we expected.
    #[error("error decoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-2xx status, or a 2xx response whose envelope reports `"status": "error"`.
    #[error("error in response: status={status}, message={message}")]
    Api { status: u16, message: String },

    /// The request was abandoned because the surrounding scrape was cancelled.
    #[error("request cancelled")]
    Cancelled,
}

/// Coarse classification used in logs and by callers that only care about
/// which side failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Api,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "transport"),
            ErrorKind::Decode => write!(f, "decode"),
            ErrorKind::Api => write!(f, "api"),
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport(_) | ClientError::Cancelled => ErrorKind::Transport,
            ClientError::Decode(_) => ErrorKind::Decode,
            // Construction errors are configuration problems surfaced by the API layer.
            ClientError::Api { .. } | ClientError::InvalidUrl { .. } | ClientError::InvalidToken(_) => {
                ErrorKind::Api
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
