//! Networks and extended-key version magics

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Target network for keys and addresses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    /// Leading byte of a pay-to-pubkey-hash address
    pub fn address_prefix(self) -> u8 {
        match self {
            Self::Mainnet => 0x00,
            Self::Testnet => 0x6f,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainnet => f.write_str("mainnet"),
            Self::Testnet => f.write_str("testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            other => Err(Error::InvalidParameter(format!("Unknown network: {}", other))),
        }
    }
}

/// The 4-byte tag leading every serialized extended key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    MainnetPrivate,
    MainnetPublic,
    TestnetPrivate,
    TestnetPublic,
}

impl Version {
    /// Private-key version for a network
    pub fn private(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::MainnetPrivate,
            Network::Testnet => Self::TestnetPrivate,
        }
    }

    /// Public-key version for a network
    pub fn public(network: Network) -> Self {
        match network {
            Network::Mainnet => Self::MainnetPublic,
            Network::Testnet => Self::TestnetPublic,
        }
    }

    /// Serialized magic bytes
    pub fn magic(self) -> [u8; 4] {
        match self {
            Self::MainnetPrivate => [0x04, 0x88, 0xad, 0xe4],
            Self::MainnetPublic => [0x04, 0x88, 0xb2, 0x1e],
            Self::TestnetPrivate => [0x04, 0x35, 0x83, 0x94],
            Self::TestnetPublic => [0x04, 0x35, 0x87, 0xcf],
        }
    }

    /// Look up a version by its magic bytes
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        [
            Self::MainnetPrivate,
            Self::MainnetPublic,
            Self::TestnetPrivate,
            Self::TestnetPublic,
        ]
        .into_iter()
        .find(|version| version.magic() == magic)
    }

    pub fn network(self) -> Network {
        match self {
            Self::MainnetPrivate | Self::MainnetPublic => Network::Mainnet,
            Self::TestnetPrivate | Self::TestnetPublic => Network::Testnet,
        }
    }

    pub fn is_private(self) -> bool {
        matches!(self, Self::MainnetPrivate | Self::TestnetPrivate)
    }

    /// The public marker of the same network
    pub fn to_public(self) -> Self {
        Self::public(self.network())
    }
}
