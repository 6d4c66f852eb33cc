// Remote Service Gateway Error Types

use thiserror::Error;

/// Gateway Error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never reached the service or the response never came back
    #[error("Cannot reach service: {0}")]
    Transport(String),

    /// The response could not be read as the expected shape
    #[error("Invalid response from server: {0}")]
    Protocol(String),

    /// The service explicitly reported failure
    #[error("{0}")]
    Remote(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Protocol(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Protocol(err.to_string())
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Gateway error codes for the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorCode {
    Transport,
    Protocol,
    Remote,
}

impl GatewayErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatewayErrorCode::Transport => "GATEWAY_TRANSPORT",
            GatewayErrorCode::Protocol => "GATEWAY_PROTOCOL",
            GatewayErrorCode::Remote => "GATEWAY_REMOTE",
        }
    }
}

impl GatewayError {
    pub fn code(&self) -> GatewayErrorCode {
        match self {
            GatewayError::Transport(_) => GatewayErrorCode::Transport,
            GatewayError::Protocol(_) => GatewayErrorCode::Protocol,
            GatewayError::Remote(_) => GatewayErrorCode::Remote,
        }
    }
}

impl From<GatewayError> for String {
    fn from(err: GatewayError) -> Self {
        err.to_string()
    }
}
