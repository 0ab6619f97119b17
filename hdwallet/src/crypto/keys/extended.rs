//! Extended keys: a key plus the chain code and tree position it was derived at

use std::fmt;

use secp256k1::{PublicKey, Secp256k1, SecretKey};
use zeroize::Zeroize;

use crate::crypto::hash::{hash160, hmac_sha512};
use crate::error::{Error, Result};
use super::version::{Network, Version};

/// First index of the hardened range (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key used to turn a seed into the master key
pub const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Length of the key material field
pub const KEY_LEN: usize = 33;

/// Length of the chain code field
pub const CHAIN_CODE_LEN: usize = 32;

/// A node of the derivation tree
///
/// Values are immutable and own all of their bytes, so siblings derived from
/// the same parent never share a buffer. Private key material is wiped when
/// the value is dropped.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ExtendedKey {
    pub(super) version: Version,
    pub(super) depth: u16,
    pub(super) parent_fingerprint: [u8; 4],
    pub(super) child_index: u32,
    pub(super) chain_code: [u8; CHAIN_CODE_LEN],
    /// `0x00 ‖ scalar` for private keys, compressed point for public keys
    pub(super) key: [u8; KEY_LEN],
}

impl ExtendedKey {
    /// Build the master key from a seed
    pub fn master_key(seed: &[u8], network: Network) -> Result<Self> {
        let (secret, chain_code) = hmac_sha512(MASTER_HMAC_KEY, seed)?;
        Self::master_from_hmac(secret, chain_code, network)
    }

    /// Master key from the two HMAC halves; the left half must be a valid scalar
    pub(super) fn master_from_hmac(
        mut secret: [u8; 32],
        chain_code: [u8; CHAIN_CODE_LEN],
        network: Network,
    ) -> Result<Self> {
        let secret_key = SecretKey::from_slice(&secret).map_err(|_| Error::InvalidMasterKey);
        secret.zeroize();
        let secret_key = secret_key?;

        let mut key = [0u8; KEY_LEN];
        key[1..].copy_from_slice(&secret_key.secret_bytes());

        Ok(Self {
            version: Version::private(network),
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            chain_code,
            key,
        })
    }

    /// Assemble a key from its fields, checking the key material
    pub fn from_raw_parts(
        version: Version,
        depth: u16,
        parent_fingerprint: [u8; 4],
        child_index: u32,
        chain_code: [u8; CHAIN_CODE_LEN],
        key: [u8; KEY_LEN],
    ) -> Result<Self> {
        if version.is_private() {
            if key[0] != 0 {
                return Err(Error::InvalidEncoding("Private key must start with 0x00".to_string()));
            }
            SecretKey::from_slice(&key[1..])
                .map_err(|_| Error::InvalidEncoding("Private key out of range".to_string()))?;
        } else {
            PublicKey::from_slice(&key)
                .map_err(|_| Error::InvalidEncoding("Public key is not on the curve".to_string()))?;
        }

        Ok(Self {
            version,
            depth,
            parent_fingerprint,
            child_index,
            chain_code,
            key,
        })
    }

    /// Public projection of this key
    ///
    /// Public keys come back unchanged. Private keys keep their chain code
    /// and tree position and switch to the public version of their network.
    pub fn neuter(&self) -> Result<Self> {
        if !self.is_private() {
            return Ok(self.clone());
        }

        Ok(Self {
            version: self.version.to_public(),
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            chain_code: self.chain_code,
            key: self.public_key()?.serialize(),
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn network(&self) -> Network {
        self.version.network()
    }

    pub fn is_private(&self) -> bool {
        self.version.is_private()
    }

    /// Number of derivation steps from the master key
    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Whether this key was produced by hardened derivation
    pub fn is_hardened(&self) -> bool {
        self.child_index >= HARDENED_OFFSET
    }

    pub fn chain_code(&self) -> &[u8; CHAIN_CODE_LEN] {
        &self.chain_code
    }

    /// The raw 33-byte key field
    pub fn key_material(&self) -> &[u8; KEY_LEN] {
        &self.key
    }

    /// The private scalar, if this is a private key
    pub fn secret_bytes(&self) -> Option<[u8; 32]> {
        if !self.is_private() {
            return None;
        }
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&self.key[1..]);
        Some(secret)
    }

    /// Compressed public key
    pub fn public_key_bytes(&self) -> Result<[u8; KEY_LEN]> {
        Ok(self.public_key()?.serialize())
    }

    /// First four bytes of HASH160 of the compressed public key
    ///
    /// Children of this key carry it as their parent fingerprint.
    pub fn fingerprint(&self) -> Result<[u8; 4]> {
        Ok(fingerprint_of(&self.public_key()?))
    }

    pub(crate) fn secret_key(&self) -> Result<SecretKey> {
        if !self.is_private() {
            return Err(Error::InvalidParameter("Public key has no private scalar".to_string()));
        }
        SecretKey::from_slice(&self.key[1..])
            .map_err(|e| Error::InvalidEncoding(format!("Invalid private key: {}", e)))
    }

    pub(crate) fn public_key(&self) -> Result<PublicKey> {
        if self.is_private() {
            let secp = Secp256k1::new();
            Ok(PublicKey::from_secret_key(&secp, &self.secret_key()?))
        } else {
            PublicKey::from_slice(&self.key)
                .map_err(|e| Error::InvalidEncoding(format!("Invalid public key: {}", e)))
        }
    }
}

pub(super) fn fingerprint_of(public_key: &PublicKey) -> [u8; 4] {
    let hash = hash160(&public_key.serialize());
    [hash[0], hash[1], hash[2], hash[3]]
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ExtendedKey");
        debug
            .field("version", &self.version)
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index);
        if self.is_private() {
            debug.field("key", &"<private>");
        } else {
            debug
                .field("chain_code", &hex::encode(self.chain_code))
                .field("key", &hex::encode(self.key));
        }
        debug.finish()
    }
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.key.zeroize();
        self.chain_code.zeroize();
    }
}
