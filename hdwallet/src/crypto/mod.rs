//! Cryptographic primitives and operations
//!
//! This module provides entropy generation, mnemonic encoding, seed
//! stretching and the hierarchical deterministic key tree.

pub mod entropy;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod seed;

pub use entropy::*;
pub use keys::*;
pub use mnemonic::*;
pub use seed::*;
