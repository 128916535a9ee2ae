//! ECDSA signature value type

use crate::errors::{CroSignerError, CroSignerResult};
use base64::{engine::general_purpose::STANDARD, Engine};

/// A secp256k1 ECDSA signature in the fixed 64-byte `r || s` form the chain
/// expects (no DER framing)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// Fixed 64-byte form (`r || s`)
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// Parse from a 64-byte slice
    pub fn from_bytes(bytes: &[u8]) -> CroSignerResult<Self> {
        if bytes.len() != 64 {
            return Err(CroSignerError::InvalidSignature {
                message: format!("expected 64 bytes, got {}", bytes.len()),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Self { r, s })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    pub fn from_base64(encoded: &str) -> CroSignerResult<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| CroSignerError::InvalidSignature {
                message: format!("invalid base64: {e}"),
            })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    pub fn from_hex(hex_str: &str) -> CroSignerResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| CroSignerError::InvalidSignature {
            message: format!("invalid hex: {e}"),
        })?;
        Self::from_bytes(&bytes)
    }
}
