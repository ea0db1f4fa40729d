use thiserror::Error;

use crate::client::TransportError;

/// All errors that can occur in the CredHub client.
#[derive(Debug, Error)]
pub enum CredHubError {
    // --- Retrieval errors ---
    /// Raised by the request signer; the message is passed through untouched.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("response did not contain any credentials")]
    EmptyResult,

    #[error("server responded with status {status}: {message}")]
    Server { status: u16, message: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredHub results.
pub type Result<T> = std::result::Result<T, CredHubError>;
