//! Secure random entropy for mnemonics and raw seeds

use rand::{rngs::OsRng, RngCore};

use crate::error::{Error, Result};

/// Smallest raw seed accepted by `generate_seed`, in bytes
pub const MIN_SEED_BYTES: usize = 16;
/// Largest raw seed accepted by `generate_seed`, in bytes
pub const MAX_SEED_BYTES: usize = 64;

/// A source of cryptographically secure random bytes
pub trait EntropySource {
    /// Fill `buf` completely or fail
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// Entropy read from the operating system RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| Error::EntropySourceFailure(e.to_string()))
    }
}

/// Check that `bits` is a multiple of 32 within [128, 256]
pub fn validate_entropy_bits(bits: usize) -> Result<()> {
    if bits % 32 != 0 || !(128..=256).contains(&bits) {
        return Err(Error::InvalidParameter(format!(
            "Entropy length must be [128, 256] and a multiple of 32, got {}",
            bits
        )));
    }
    Ok(())
}

/// Generate `bits` of entropy from the operating system RNG
pub fn generate_entropy(bits: usize) -> Result<Vec<u8>> {
    generate_entropy_with(&mut OsEntropy, bits)
}

/// Generate `bits` of entropy from the given source
///
/// A failing source is reported as is; the read is never retried here.
pub fn generate_entropy_with<S: EntropySource + ?Sized>(source: &mut S, bits: usize) -> Result<Vec<u8>> {
    validate_entropy_bits(bits)?;

    let mut entropy = vec![0u8; bits / 8];
    source.fill(&mut entropy)?;
    Ok(entropy)
}

/// Generate a raw seed of `len` bytes for bootstrapping a master key directly
pub fn generate_seed(len: usize) -> Result<Vec<u8>> {
    generate_seed_with(&mut OsEntropy, len)
}

/// Generate a raw seed of `len` bytes from the given source
pub fn generate_seed_with<S: EntropySource + ?Sized>(source: &mut S, len: usize) -> Result<Vec<u8>> {
    if !(MIN_SEED_BYTES..=MAX_SEED_BYTES).contains(&len) {
        return Err(Error::InvalidParameter(format!(
            "Seed length must be between {} and {} bytes, got {}",
            MIN_SEED_BYTES, MAX_SEED_BYTES, len
        )));
    }

    let mut seed = vec![0u8; len];
    source.fill(&mut seed)?;
    Ok(seed)
}
