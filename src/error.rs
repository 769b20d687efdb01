use thiserror::Error;

/// Result type alias for API client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the BlogSphere API client
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP 401; the session token is no longer valid
    #[error("Not authorized")]
    Unauthorized,

    /// Any other non-2xx response
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// Connection, timeout or body read failures
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected JSON
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Whether this error must end the current session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Message suitable for the status line
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(e) if e.is_timeout() => "Request timed out".to_string(),
            ApiError::Network(e) if e.is_connect() => "Could not reach the server".to_string(),
            _ => "An unexpected error occurred".to_string(),
        }
    }
}
