//! Hierarchical deterministic key tree
//!
//! This module provides the extended key type, master key generation, child
//! derivation, public projection, addresses and the extended-key wire format.

mod address;
mod derivation;
mod encoding;
mod extended;
mod path;
mod version;

pub use encoding::{PAYLOAD_LEN, SERIALIZED_LEN};
pub use extended::{ExtendedKey, CHAIN_CODE_LEN, HARDENED_OFFSET, KEY_LEN, MASTER_HMAC_KEY};
pub use path::DerivationPath;
pub use version::{Network, Version};
