//! Wallet configuration
//!
//! Settings can come from defaults, environment variables or a JSON file.
//! Environment values that fail to parse fall back to the default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::entropy::validate_entropy_bits;
use crate::crypto::keys::Network;
use crate::crypto::mnemonic::Language;
use crate::error::{Error, Result};

/// Default bound for `ExtendedKey::child_skip_invalid` retries.
pub const DEFAULT_MAX_CHILD_ATTEMPTS: u32 = 8;

/// Default entropy size for new mnemonics (24 words).
pub const DEFAULT_ENTROPY_BITS: usize = 256;

/// Configuration shared by the wallet facade and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Network used for new master keys and addresses
    pub network: Network,
    /// Dictionary used for new mnemonics
    pub language: Language,
    /// Entropy size for new mnemonics
    pub entropy_bits: usize,
    /// How many consecutive indices to try when a child is invalid
    pub max_child_attempts: u32,
    /// Verify the embedded checksum when restoring from a phrase
    pub verify_checksum: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            language: Language::English,
            entropy_bits: DEFAULT_ENTROPY_BITS,
            max_child_attempts: DEFAULT_MAX_CHILD_ATTEMPTS,
            verify_checksum: true,
        }
    }
}

impl WalletConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let network = std::env::var("HDWALLET_NETWORK")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.network);

        let language = std::env::var("HDWALLET_LANGUAGE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.language);

        let entropy_bits = std::env::var("HDWALLET_ENTROPY_BITS")
            .unwrap_or_else(|_| DEFAULT_ENTROPY_BITS.to_string())
            .parse()
            .unwrap_or(defaults.entropy_bits);

        let max_child_attempts = std::env::var("HDWALLET_MAX_CHILD_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_CHILD_ATTEMPTS.to_string())
            .parse()
            .unwrap_or(defaults.max_child_attempts);

        let verify_checksum = std::env::var("HDWALLET_VERIFY_CHECKSUM")
            .unwrap_or_else(|_| "true".to_string())
            .parse()
            .unwrap_or(defaults.verify_checksum);

        Self {
            network,
            language,
            entropy_bits,
            max_child_attempts,
            verify_checksum,
        }
    }

    /// Parse configuration from a JSON document; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Can't read {}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    /// Check that the values are usable
    pub fn validate(&self) -> Result<()> {
        validate_entropy_bits(self.entropy_bits)
            .map_err(|e| Error::Config(e.to_string()))?;

        if self.max_child_attempts == 0 {
            return Err(Error::Config("max_child_attempts must be at least 1".to_string()));
        }

        Ok(())
    }
}
