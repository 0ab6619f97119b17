//! Hierarchical deterministic key derivation with mnemonic passphrases
//!
//! This library turns one random seed into an unbounded tree of signing keys
//! and addresses: secure entropy generation, multi-language mnemonic
//! encoding, PBKDF2 seed stretching, and BIP32-style extended keys with their
//! base58 wire format.

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;

// Re-export commonly used types for convenience
pub use account::HdWallet;
pub use config::WalletConfig;
pub use crypto::keys::{DerivationPath, ExtendedKey, Network, Version, HARDENED_OFFSET};
pub use crypto::mnemonic::{Language, Mnemonic, MnemonicCodec};
pub use crypto::seed::{derive_seed, Seed};
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
