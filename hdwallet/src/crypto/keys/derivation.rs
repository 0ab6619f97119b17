//! Child key derivation

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::crypto::hash::hmac_sha512;
use crate::error::{Error, Result};
use super::extended::{fingerprint_of, ExtendedKey, CHAIN_CODE_LEN, HARDENED_OFFSET, KEY_LEN};
use super::path::DerivationPath;

impl ExtendedKey {
    /// Derive the child at `index`
    ///
    /// Indices at or above 2^31 are hardened and need a private parent. A
    /// derived scalar that is zero or not below the curve order yields
    /// [`Error::InvalidChild`]; see [`ExtendedKey::child_skip_invalid`] for a
    /// bounded retry.
    pub fn child(&self, index: u32) -> Result<ExtendedKey> {
        let child = if self.is_private() {
            self.private_child(index)?
        } else {
            self.public_child(index)?
        };

        debug!(
            depth = child.depth,
            index,
            hardened = child.is_hardened(),
            private = child.is_private(),
            "Derived child key"
        );

        Ok(child)
    }

    /// Derive the first valid child at `index` or one of the following indices
    ///
    /// At most `max_attempts` indices are tried and the search never crosses
    /// between the normal and hardened ranges. Returns the index actually used
    /// together with the child.
    pub fn child_skip_invalid(&self, index: u32, max_attempts: u32) -> Result<(u32, ExtendedKey)> {
        skip_invalid(index, max_attempts, |candidate| self.child(candidate))
    }

    /// Derive every index of `path` in turn
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedKey> {
        let mut key = self.clone();
        for index in path.iter() {
            key = key.child(index)?;
        }
        Ok(key)
    }

    fn private_child(&self, index: u32) -> Result<ExtendedKey> {
        let parent_public_key = self.public_key()?;

        let mut data = Vec::with_capacity(KEY_LEN + 4);
        if index >= HARDENED_OFFSET {
            // Hardened derivation
            data.extend_from_slice(&self.key);
        } else {
            // Normal derivation
            data.extend_from_slice(&parent_public_key.serialize());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let hmac = hmac_sha512(&self.chain_code, &data);
        data.zeroize();
        let (il, chain_code) = hmac?;

        self.child_from_hmac(&parent_public_key, index, il, chain_code)
    }

    fn public_child(&self, index: u32) -> Result<ExtendedKey> {
        if index >= HARDENED_OFFSET {
            return Err(Error::PrivateDerivationOnPublicKey(index));
        }

        let parent_public_key = self.public_key()?;

        let mut data = Vec::with_capacity(KEY_LEN + 4);
        data.extend_from_slice(&self.key);
        data.extend_from_slice(&index.to_be_bytes());

        let (il, chain_code) = hmac_sha512(&self.chain_code, &data)?;
        self.child_from_hmac(&parent_public_key, index, il, chain_code)
    }

    /// Finish a derivation step from the two HMAC halves
    pub(super) fn child_from_hmac(
        &self,
        parent_public_key: &PublicKey,
        index: u32,
        mut il: [u8; 32],
        chain_code: [u8; CHAIN_CODE_LEN],
    ) -> Result<ExtendedKey> {
        // IL must be a nonzero scalar below n
        let tweak = SecretKey::from_slice(&il).map_err(|_| Error::InvalidChild { index });
        il.zeroize();
        let tweak = Scalar::from(tweak?);

        let key = if self.is_private() {
            // (IL + kpar) mod n; a zero sum is rejected as well
            let child_secret_key = self
                .secret_key()?
                .add_tweak(&tweak)
                .map_err(|_| Error::InvalidChild { index })?;

            let mut key = [0u8; KEY_LEN];
            key[1..].copy_from_slice(&child_secret_key.secret_bytes());
            key
        } else {
            // IL·G + Kpar; the point at infinity is rejected
            let secp = Secp256k1::verification_only();
            parent_public_key
                .add_exp_tweak(&secp, &tweak)
                .map_err(|_| Error::InvalidChild { index })?
                .serialize()
        };

        Ok(ExtendedKey {
            version: self.version,
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: fingerprint_of(parent_public_key),
            child_index: index,
            chain_code,
            key,
        })
    }
}

/// Call `derive` on `index` and the indices after it until one is not rejected
/// as an invalid child, staying on the same side of the hardened boundary
fn skip_invalid<F>(index: u32, max_attempts: u32, mut derive: F) -> Result<(u32, ExtendedKey)>
where
    F: FnMut(u32) -> Result<ExtendedKey>,
{
    if max_attempts == 0 {
        return Err(Error::InvalidParameter("max_attempts must be at least 1".to_string()));
    }

    let hardened = index >= HARDENED_OFFSET;
    let mut candidate = index;
    let mut last_error = Error::InvalidChild { index };

    for _ in 0..max_attempts {
        match derive(candidate) {
            Err(Error::InvalidChild { index: skipped }) => {
                warn!(index = skipped, "Skipping invalid child index");
                last_error = Error::InvalidChild { index: skipped };
            }
            other => return other.map(|child| (candidate, child)),
        }

        candidate = match candidate.checked_add(1) {
            Some(next) if (next >= HARDENED_OFFSET) == hardened => next,
            _ => break,
        };
    }

    Err(last_error)
}
