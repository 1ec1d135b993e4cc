use thiserror::Error;

/// Result type for usersearch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for usersearch operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level failure: connection refused, timeout, TLS, DNS
    #[error("Transport error: {0}")]
    Transport(String),

    /// The transport succeeded but the response carried no payload
    #[error("Response body was empty")]
    EmptyBody,

    /// Payload received but it does not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Creates a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
