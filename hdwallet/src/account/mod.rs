//! Account-level entry points
//!
//! This module provides the wallet facade used to create and restore master
//! keys from mnemonic phrases, plus helpers over base58 key strings.

mod wallet;

pub use wallet::*;
