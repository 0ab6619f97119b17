//! Pay-to-pubkey-hash addresses

use crate::crypto::hash::{checksum, hash160};
use crate::error::Result;
use super::extended::ExtendedKey;

impl ExtendedKey {
    /// Base58 address of this key's public point
    ///
    /// The point is hashed in its uncompressed `0x04 ‖ X ‖ Y` form and the
    /// network prefix is `0x00` for mainnet, `0x6f` for testnet.
    pub fn address(&self) -> Result<String> {
        let point = self.public_key()?.serialize_uncompressed();

        let mut address = Vec::with_capacity(25);
        address.push(self.network().address_prefix());
        address.extend_from_slice(&hash160(&point));

        let check = checksum(&address);
        address.extend_from_slice(&check);

        Ok(bs58::encode(address).into_string())
    }
}
