//! Deterministic key derivation and the signing key pair
//!
//! BIP-39 mnemonic → BIP-32 derivation at a path → secp256k1 key pair. The
//! same (mnemonic, path) always yields the same private key; the derivation
//! is the standardized algorithm, so it reproduces across implementations.
//!
//! The private key lives only inside [`KeyPair`] and is never logged or
//! printed; `Debug` shows the public key alone.

use crate::address::public_key_to_address;
use crate::errors::{CroSignerError, CroSignerResult};
use crate::network::Network;
use crate::signature::Signature;
use bip32::{DerivationPath, XPrv};
use bip39::Mnemonic;
use k256::ecdsa::{
    signature::Signer as EcdsaSigner, signature::Verifier, Signature as EcdsaSignature,
    SigningKey, VerifyingKey,
};

/// Convert a BIP-39 mnemonic phrase to its 64-byte seed
///
/// The phrase must pass wordlist and checksum validation.
pub fn mnemonic_to_seed(mnemonic_str: &str, passphrase: &str) -> CroSignerResult<[u8; 64]> {
    let mnemonic =
        Mnemonic::parse_normalized(mnemonic_str).map_err(|e| CroSignerError::InvalidMnemonic {
            message: e.to_string(),
        })?;
    let seed = mnemonic.to_seed(passphrase);
    let mut result = [0u8; 64];
    result.copy_from_slice(&seed);
    Ok(result)
}

/// Derive a 32-byte private key from a mnemonic at a BIP-32 path
///
/// Path strings use the usual notation, e.g. `m/44'/1'/0'/0/0`.
pub fn derive_priv_key(mnemonic: &str, path: &str) -> CroSignerResult<[u8; 32]> {
    let seed = mnemonic_to_seed(mnemonic, "")?;
    let derivation_path: DerivationPath =
        path.parse().map_err(|e| CroSignerError::InvalidPath {
            message: format!("'{path}': {e}"),
        })?;
    let xprv =
        XPrv::derive_from_path(seed, &derivation_path).map_err(|e| CroSignerError::InvalidPath {
            message: format!("derivation at '{path}' failed: {e}"),
        })?;
    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&xprv.private_key().to_bytes());
    Ok(private_key)
}

/// Derive a private key at the network's default path for an address index
pub fn derive_priv_key_at(
    mnemonic: &str,
    network: &Network,
    index: u32,
) -> CroSignerResult<[u8; 32]> {
    derive_priv_key(mnemonic, &network.derivation_path(index))
}

/// A secp256k1 key pair; the sole holder of signing capability
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: [u8; 33],
}

impl KeyPair {
    /// Build a key pair from raw private key bytes
    pub fn from_priv_key(private_key: &[u8]) -> CroSignerResult<Self> {
        if private_key.len() != 32 {
            return Err(CroSignerError::InvalidKeyLength {
                expected: 32,
                actual: private_key.len(),
            });
        }
        let signing_key = SigningKey::from_slice(private_key).map_err(|e| {
            CroSignerError::PointNotOnCurve {
                message: e.to_string(),
            }
        })?;
        let compressed = signing_key.verifying_key().to_encoded_point(true);
        let mut public_key = [0u8; 33];
        public_key.copy_from_slice(compressed.as_bytes());
        Ok(Self {
            signing_key,
            public_key,
        })
    }

    /// Derive a key pair from a mnemonic at a BIP-32 path
    pub fn from_mnemonic(mnemonic: &str, path: &str) -> CroSignerResult<Self> {
        let private_key = derive_priv_key(mnemonic, path)?;
        Self::from_priv_key(&private_key)
    }

    /// Compressed public key (33 bytes)
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }

    /// Sign arbitrary bytes
    ///
    /// RFC 6979 deterministic ECDSA over the SHA-256 digest of the message,
    /// low-S normalized (the chain rejects high-S signatures).
    pub fn sign(&self, data: &[u8]) -> CroSignerResult<Signature> {
        let signature: EcdsaSignature =
            self.signing_key
                .try_sign(data)
                .map_err(|e| CroSignerError::SigningFailure {
                    message: e.to_string(),
                })?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Signature::new(r, s))
    }

    /// Verify a signature produced by this key pair
    pub fn verify(&self, data: &[u8], signature: &Signature) -> CroSignerResult<bool> {
        verify_signature(&self.public_key, data, signature)
    }

    /// Bech32 account address for this key on the given network
    pub fn address(&self, network: &Network) -> CroSignerResult<String> {
        public_key_to_address(&self.public_key, network.address_prefix)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Verify a signature against a compressed public key
pub fn verify_signature(
    public_key: &[u8; 33],
    data: &[u8],
    signature: &Signature,
) -> CroSignerResult<bool> {
    let verifying_key =
        VerifyingKey::from_sec1_bytes(public_key).map_err(|e| CroSignerError::PointNotOnCurve {
            message: e.to_string(),
        })?;
    let sig_bytes = signature.to_bytes();
    let ecdsa_sig =
        EcdsaSignature::from_slice(&sig_bytes).map_err(|e| CroSignerError::InvalidSignature {
            message: e.to_string(),
        })?;
    Ok(verifying_key.verify(data, &ecdsa_sig).is_ok())
}
