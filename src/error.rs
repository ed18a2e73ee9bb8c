use thiserror::Error;

/// Errors raised by the Drone client.
///
/// HTTP error statuses (4xx/5xx) are deliberately absent: they come back as
/// ordinary [`ApiResponse`](crate::client::ApiResponse) values.
#[derive(Error, Debug)]
pub enum DroneError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid parameter: `{0}` must not be empty")]
    InvalidParameter(&'static str),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DroneError {
    /// True when no response was obtained (connect, DNS, TLS, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// True when the call failed before any network activity.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidParameter(_))
    }
}

pub type Result<T> = std::result::Result<T, DroneError>;
