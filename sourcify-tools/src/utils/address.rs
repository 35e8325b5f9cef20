// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Address format checks performed before any request leaves the client.

use alloy::primitives::Address;

use crate::{Error, Result};

const ADDRESS_HEX_LEN: usize = 40;

/// Returns true if `text` is a `0x`-prefixed, 40 digit hex address.
///
/// All-lowercase and all-uppercase addresses are accepted as is. Mixed-case addresses must carry a
/// valid EIP-55 checksum.
pub fn is_address(text: &str) -> bool {
    let Some(digits) = text.strip_prefix("0x") else {
        return false;
    };
    if digits.len() != ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return false;
    }

    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(text, None).is_ok()
    } else {
        true
    }
}

/// Fails with [`Error::InvalidAddress`] unless `text` passes [`is_address`].
pub fn check_address(text: &str) -> Result<()> {
    if is_address(text) {
        Ok(())
    } else {
        Err(Error::InvalidAddress(text.to_owned()))
    }
}
