//! Bech32 account addresses
//!
//! An account address is derived from the compressed public key as
//! SHA-256 → RIPEMD-160 → bech32 with the network's prefix. The derivation is
//! a pure function: the same public key and prefix always produce the same
//! address.

use crate::errors::{CroSignerError, CroSignerResult};
use bech32::{Bech32, Hrp};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Derive the bech32 account address for a compressed public key
pub fn public_key_to_address(public_key: &[u8; 33], prefix: &str) -> CroSignerResult<String> {
    let sha256_hash = Sha256::digest(public_key);
    let ripemd_hash = Ripemd160::digest(sha256_hash);

    let hrp = Hrp::parse(prefix).map_err(|e| CroSignerError::InvalidAddress {
        message: format!("invalid prefix '{prefix}': {e}"),
    })?;
    bech32::encode::<Bech32>(hrp, ripemd_hash.as_slice()).map_err(|e| {
        CroSignerError::InvalidAddress {
            message: format!("bech32 encoding failed: {e}"),
        }
    })
}

/// Validate a bech32 address, optionally pinning the expected prefix
///
/// Returns the `(prefix, 20-byte key hash)` on success.
pub fn validate_address(
    address: &str,
    expected_prefix: Option<&str>,
) -> CroSignerResult<(String, Vec<u8>)> {
    let (hrp, data) = bech32::decode(address).map_err(|e| CroSignerError::InvalidAddress {
        message: format!("'{address}': {e}"),
    })?;
    let prefix = hrp.to_string();

    if let Some(expected) = expected_prefix {
        if prefix != expected {
            return Err(CroSignerError::InvalidAddress {
                message: format!("expected prefix '{expected}', got '{prefix}'"),
            });
        }
    }
    if data.len() != 20 {
        return Err(CroSignerError::InvalidAddress {
            message: format!("expected 20 bytes of address data, got {}", data.len()),
        });
    }
    Ok((prefix, data))
}
