//! Signable and signed transaction stages
//!
//! A [`SignableTransaction`] is the immutable canonical snapshot: identical
//! builder inputs always produce identical bytes here, which is what makes
//! the signature verifiable and the pipeline reproducible. Signatures are
//! attached per signer slot; sealing yields the terminal
//! [`SignedTransaction`].

use super::builder::Signer;
use super::types::{SignDoc, TxRaw};
use crate::errors::{CroSignerError, CroSignerResult};
use crate::keys::verify_signature;
use crate::signature::Signature;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};

/// Canonical transaction bytes awaiting signatures
#[derive(Clone, Debug)]
pub struct SignableTransaction {
    body_bytes: Vec<u8>,
    auth_info_bytes: Vec<u8>,
    chain_id: String,
    signers: Vec<Signer>,
    signatures: Vec<Option<Signature>>,
}

impl SignableTransaction {
    pub(crate) fn new(
        body_bytes: Vec<u8>,
        auth_info_bytes: Vec<u8>,
        chain_id: String,
        signers: Vec<Signer>,
    ) -> Self {
        let slots = signers.len();
        Self {
            body_bytes,
            auth_info_bytes,
            chain_id,
            signers,
            signatures: vec![None; slots],
        }
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    pub fn auth_info_bytes(&self) -> &[u8] {
        &self.auth_info_bytes
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Canonical SignDoc bytes for the signer at `signer_index`
    ///
    /// This is the exact byte sequence that signer must sign: the shared
    /// body and auth info bound to the chain ID and that signer's account
    /// number.
    pub fn to_sign_doc(&self, signer_index: usize) -> CroSignerResult<Vec<u8>> {
        let signer = self.signer(signer_index)?;
        let doc = SignDoc::new(
            self.body_bytes.clone(),
            self.auth_info_bytes.clone(),
            self.chain_id.clone(),
            signer.account_number,
        );
        Ok(doc.encode())
    }

    /// Attach a signature for a signer slot
    ///
    /// No cryptographic validation happens here — the broadcasting node
    /// rejects bad signatures; use [`verify_signatures`](Self::verify_signatures)
    /// for a local check before sending.
    pub fn set_signature(
        mut self,
        signer_index: usize,
        signature: Signature,
    ) -> CroSignerResult<Self> {
        if signer_index >= self.signatures.len() {
            return Err(CroSignerError::IndexOutOfRange {
                index: signer_index,
                len: self.signatures.len(),
            });
        }
        self.signatures[signer_index] = Some(signature);
        Ok(self)
    }

    /// Verify every attached signature against its signer's public key
    pub fn verify_signatures(&self) -> CroSignerResult<()> {
        for (index, slot) in self.signatures.iter().enumerate() {
            if let Some(signature) = slot {
                let doc = self.to_sign_doc(index)?;
                let valid = verify_signature(&self.signers[index].public_key, &doc, signature)?;
                if !valid {
                    return Err(CroSignerError::InvalidSignature {
                        message: format!("signature for signer {index} does not verify"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Seal into an immutable [`SignedTransaction`]
    pub fn to_signed(self) -> CroSignerResult<SignedTransaction> {
        let missing = self.signatures.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            return Err(CroSignerError::MissingSignatures { missing });
        }
        let signatures = self
            .signatures
            .into_iter()
            .flatten()
            .map(|s| s.to_bytes().to_vec())
            .collect();
        Ok(SignedTransaction {
            tx_raw: TxRaw::new(self.body_bytes, self.auth_info_bytes, signatures),
        })
    }

    fn signer(&self, index: usize) -> CroSignerResult<&Signer> {
        self.signers.get(index).ok_or(CroSignerError::IndexOutOfRange {
            index,
            len: self.signers.len(),
        })
    }
}

/// A fully signed, immutable transaction ready for broadcast
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    tx_raw: TxRaw,
}

impl SignedTransaction {
    pub fn tx_raw(&self) -> &TxRaw {
        &self.tx_raw
    }

    /// Full encoded transaction bytes
    pub fn encoded(&self) -> Vec<u8> {
        self.tx_raw.encode()
    }

    /// Canonical transaction identifier: uppercase hex SHA-256 of the
    /// encoded bytes
    pub fn tx_hash(&self) -> String {
        let digest = Sha256::digest(self.encoded());
        hex::encode_upper(digest)
    }

    /// Lowercase hex payload for `broadcast_tx_commit`
    pub fn to_hex(&self) -> String {
        hex::encode(self.encoded())
    }

    /// Base64 payload for REST broadcast endpoints
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.encoded())
    }

    /// Re-parse a hex payload produced by [`to_hex`](Self::to_hex)
    pub fn from_hex(hex_str: &str) -> CroSignerResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| CroSignerError::DecodeError {
            message: format!("invalid hex: {e}"),
        })?;
        Ok(Self {
            tx_raw: TxRaw::decode(&bytes)?,
        })
    }
}
