//! Wire format of extended keys
//!
//! `version(4) ‖ depth(1) ‖ fingerprint(4) ‖ child index(4) ‖ chain code(32) ‖
//! key(33)` followed by the first four bytes of its double SHA-256, 82 bytes
//! in total. The text form is the base58 encoding of those bytes.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::hash::checksum;
use crate::error::{Error, Result};
use super::extended::{ExtendedKey, CHAIN_CODE_LEN, KEY_LEN};
use super::version::Version;

/// Length of the payload before the checksum
pub const PAYLOAD_LEN: usize = 78;

/// Length of a serialized extended key including the checksum
pub const SERIALIZED_LEN: usize = PAYLOAD_LEN + 4;

impl ExtendedKey {
    /// Raw 82-byte serialization
    pub fn serialize(&self) -> [u8; SERIALIZED_LEN] {
        let mut data = [0u8; SERIALIZED_LEN];
        data[0..4].copy_from_slice(&self.version.magic());
        data[4] = (self.depth % 256) as u8;
        data[5..9].copy_from_slice(&self.parent_fingerprint);
        data[9..13].copy_from_slice(&self.child_index.to_be_bytes());
        data[13..45].copy_from_slice(&self.chain_code);
        data[45..PAYLOAD_LEN].copy_from_slice(&self.key);

        let check = checksum(&data[..PAYLOAD_LEN]);
        data[PAYLOAD_LEN..].copy_from_slice(&check);
        data
    }

    /// Parse the raw 82-byte serialization
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() != SERIALIZED_LEN {
            return Err(Error::InvalidEncoding(format!(
                "Expected {} bytes, got {}",
                SERIALIZED_LEN,
                data.len()
            )));
        }

        let (payload, check) = data.split_at(PAYLOAD_LEN);
        if checksum(payload) != check {
            return Err(Error::InvalidEncoding("Invalid checksum".to_string()));
        }

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&payload[0..4]);
        let version = Version::from_magic(magic)
            .ok_or_else(|| Error::InvalidEncoding(format!("Unknown version {}", hex::encode(magic))))?;

        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);

        let mut child_index = [0u8; 4];
        child_index.copy_from_slice(&payload[9..13]);

        let mut chain_code = [0u8; CHAIN_CODE_LEN];
        chain_code.copy_from_slice(&payload[13..45]);

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&payload[45..PAYLOAD_LEN]);

        Self::from_raw_parts(
            version,
            payload[4] as u16,
            parent_fingerprint,
            u32::from_be_bytes(child_index),
            chain_code,
            key,
        )
    }

    /// Base58 text form
    pub fn to_base58(&self) -> String {
        bs58::encode(self.serialize()).into_string()
    }

    /// Parse the base58 text form
    pub fn from_base58(data: &str) -> Result<Self> {
        let bytes = bs58::decode(data)
            .into_vec()
            .map_err(|e| Error::InvalidEncoding(e.to_string()))?;
        Self::parse(&bytes)
    }
}

impl fmt::Display for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl Serialize for ExtendedKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for ExtendedKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base58(&text).map_err(de::Error::custom)
    }
}
