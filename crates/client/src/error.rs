/// Errors from the registry client and its session store.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a failure envelope or a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    /// A success envelope arrived without the expected `data`.
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),

    #[error("Session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The session file exists but does not parse.
    #[error("Session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
