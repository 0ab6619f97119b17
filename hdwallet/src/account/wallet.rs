//! Wallet facade and string helpers
//!
//! [`HdWallet`] ties the mnemonic codec, seed stretching and the key tree
//! together under one [`WalletConfig`]. The free functions work directly on
//! base58 extended-key strings for callers that only pass text around.

use std::sync::Arc;

use tracing::info;

use crate::config::WalletConfig;
use crate::crypto::keys::{ExtendedKey, Network};
use crate::crypto::mnemonic::{Language, Mnemonic, MnemonicCodec};
use crate::crypto::seed::derive_seed;
use crate::error::{Error, Result};

/// Entropy size used by `new_wallet`
const NEW_WALLET_ENTROPY_BITS: usize = 256;

/// Creates and restores master keys from mnemonic phrases
#[derive(Debug, Clone)]
pub struct HdWallet {
    codec: Arc<MnemonicCodec>,
    config: WalletConfig,
}

impl HdWallet {
    /// Create a wallet facade over a loaded codec
    pub fn new(codec: Arc<MnemonicCodec>, config: WalletConfig) -> Result<Self> {
        config.validate()?;
        codec.dictionary(config.language)?;
        Ok(Self { codec, config })
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn codec(&self) -> &MnemonicCodec {
        &self.codec
    }

    /// Generate a new mnemonic with the configured size and language
    pub fn generate_mnemonic(&self) -> Result<Mnemonic> {
        self.codec.generate(self.config.entropy_bits, self.config.language)
    }

    /// Generate a new mnemonic and the master key it leads to
    ///
    /// The phrase is returned so it can be shown to the user for backup; it is
    /// not kept anywhere.
    pub fn create(&self, passphrase: &str) -> Result<(Mnemonic, ExtendedKey)> {
        let mnemonic = self.generate_mnemonic()?;
        let master = self.master_key_unchecked(&mnemonic.phrase(), passphrase)?;

        info!(
            language = %self.config.language,
            words = mnemonic.word_count(),
            network = %self.config.network,
            "Created new wallet"
        );

        Ok((mnemonic, master))
    }

    /// Rebuild the master key from a backed-up phrase
    pub fn restore(&self, phrase: &str, passphrase: &str) -> Result<ExtendedKey> {
        let language = self.config.language;
        if self.config.verify_checksum {
            self.codec.decode(phrase, language)?;
        } else if !self.codec.is_well_formed(phrase, language) {
            return Err(Error::Mnemonic("Invalid mnemonic phrase".to_string()));
        }

        self.master_key_unchecked(phrase, passphrase)
    }

    /// Derive a child, moving past invalid indices up to the configured bound
    pub fn child(&self, parent: &ExtendedKey, index: u32) -> Result<(u32, ExtendedKey)> {
        parent.child_skip_invalid(index, self.config.max_child_attempts)
    }

    fn master_key_unchecked(&self, phrase: &str, passphrase: &str) -> Result<ExtendedKey> {
        let seed = derive_seed(phrase, passphrase);
        ExtendedKey::master_key(seed.as_bytes(), self.config.network)
    }
}

/// New 24-word phrase and its mainnet master key
pub fn new_wallet(codec: &MnemonicCodec, passphrase: &str, language: Language) -> Result<(String, ExtendedKey)> {
    let mnemonic = codec.generate(NEW_WALLET_ENTROPY_BITS, language)?;
    let phrase = mnemonic.phrase();
    let seed = derive_seed(&phrase, passphrase);
    let master = ExtendedKey::master_key(seed.as_bytes(), Network::Mainnet)?;
    Ok((phrase, master))
}

/// Child `index` of a base58 extended key, as a base58 string
pub fn child_from_str(data: &str, index: u32) -> Result<String> {
    let key = ExtendedKey::from_base58(data)?;
    Ok(key.child(index)?.to_base58())
}

/// Address of a base58 extended key
pub fn address_from_str(data: &str) -> Result<String> {
    ExtendedKey::from_base58(data)?.address()
}

/// Check that a string is a well-formed extended key
pub fn check_str(data: &str) -> Result<()> {
    ExtendedKey::from_base58(data).map(|_| ())
}
