//! Error types for the hdwallet library

use thiserror::Error;

/// Custom error type for key derivation and mnemonic operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The derived scalar was zero or not below the curve order.
    #[error("Invalid child key at index {index:#010x}")]
    InvalidChild { index: u32 },

    #[error("Invalid master key: seed produced an out-of-range scalar")]
    InvalidMasterKey,

    #[error("Can't do private derivation on a public key (index {0:#010x})")]
    PrivateDerivationOnPublicKey(u32),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Entropy source failure: {0}")]
    EntropySourceFailure(String),

    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for hdwallet operations
pub type Result<T> = std::result::Result<T, Error>;
