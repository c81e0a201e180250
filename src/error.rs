use thiserror::Error;

/// Frame error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the layered configuration loader
    #[error("Configuration loader error: {0}")]
    ConfigLoader(#[from] config::ConfigError),

    /// No screen is registered for the requested path
    #[error("No screen registered for path: {0}")]
    UnknownRoute(String),

    /// Address is not a 20-byte hex string
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The interaction carried no connected wallet address
    #[error("No connected address in interaction")]
    MissingAddress,

    /// Contract call does not match its ABI fragment
    #[error("ABI error: {0}")]
    Abi(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
