//! Hash helpers used by the key tree and the mnemonic codec

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// SHA-256 digest
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA-256 applied twice, used for base58 checksums
pub fn dbl_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256, used for fingerprints and addresses
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(sha256(data));
    hasher.finalize().into()
}

/// First four bytes of the double SHA-256 digest
pub fn checksum(data: &[u8]) -> [u8; 4] {
    let hash = dbl_sha256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// HMAC-SHA512 split into its left and right halves
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|_| Error::InvalidParameter("HMAC key rejected".to_string()))?;
    mac.update(data);
    let result = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&result[..32]);
    right.copy_from_slice(&result[32..]);

    Ok((left, right))
}
