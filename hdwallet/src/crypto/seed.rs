//! Seed stretching from a mnemonic phrase

use std::fmt;

use sha2::Sha512;
use zeroize::Zeroize;

/// PBKDF2 rounds applied to the phrase
pub const PBKDF2_ROUNDS: u32 = 4096;

/// Length of a derived seed in bytes
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// A 64-byte seed; wiped from memory on drop
#[derive(Clone, PartialEq, Eq)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// The raw seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Stretch a phrase and passphrase into a seed
///
/// The phrase is used verbatim; checking its checksum is up to the caller.
pub fn derive_seed(mnemonic: &str, passphrase: &str) -> Seed {
    let mut salt = String::with_capacity(SALT_PREFIX.len() + passphrase.len());
    salt.push_str(SALT_PREFIX);
    salt.push_str(passphrase);

    let mut seed = [0u8; SEED_LEN];
    pbkdf2::pbkdf2_hmac::<Sha512>(mnemonic.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut seed);
    salt.zeroize();

    Seed(seed)
}
