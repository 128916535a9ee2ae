//! Raw transaction builder
//!
//! A mutable accumulator over messages, fee, memo, timeout, and signers.
//! Setters overwrite (last write wins); message and signer order is
//! significant and preserved in the final encoding. `to_signable()` takes
//! the builder by value and produces an immutable snapshot — nothing done
//! with a builder afterwards can affect bytes already produced.

use super::msg::Msg;
use super::signable::SignableTransaction;
use super::types::{Any, AuthInfo, Fee, SignerInfo, TxBody};
use crate::coin::Coin;
use crate::errors::{CroSignerError, CroSignerResult};
use crate::network::Network;

/// Gas limit applied when the caller sets none
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// Signer metadata obtained from chain state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signer {
    /// Compressed secp256k1 public key
    pub public_key: [u8; 33],
    /// Account number assigned by the chain
    pub account_number: u64,
    /// Per-account replay-protection nonce
    pub account_sequence: u64,
}

/// Accumulates transaction fields before canonicalization
#[derive(Clone, Debug, Default)]
pub struct RawTransaction {
    messages: Vec<Any>,
    fee: Option<Coin>,
    gas_limit: Option<u64>,
    memo: String,
    timeout_height: u64,
    signers: Vec<Signer>,
}

impl RawTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; order is preserved
    pub fn append_message(mut self, msg: &impl Msg) -> Self {
        self.messages.push(msg.to_any());
        self
    }

    /// Set the fee coin (overwrites a previous fee)
    pub fn set_fee(mut self, fee: Coin) -> Self {
        self.fee = Some(fee);
        self
    }

    /// Set the gas limit (overwrites; defaults to [`DEFAULT_GAS_LIMIT`])
    pub fn set_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    /// Set the memo (overwrites)
    pub fn set_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Set the block height after which the transaction expires; 0 means it
    /// never expires
    pub fn set_timeout_height(mut self, timeout_height: u64) -> Self {
        self.timeout_height = timeout_height;
        self
    }

    /// Attach a signer; the pipeline exercises exactly one, the list keeps
    /// the encoding general
    pub fn add_signer(mut self, signer: Signer) -> Self {
        self.signers.push(signer);
        self
    }

    /// Canonicalize into an immutable [`SignableTransaction`]
    ///
    /// Requires at least one message, an assigned fee, and a signer.
    pub fn to_signable(self, network: &Network) -> CroSignerResult<SignableTransaction> {
        if self.messages.is_empty() {
            return Err(CroSignerError::IncompleteTransaction {
                message: "no messages appended".to_string(),
            });
        }
        let fee = self
            .fee
            .ok_or_else(|| CroSignerError::IncompleteTransaction {
                message: "no fee assigned".to_string(),
            })?;
        if self.signers.is_empty() {
            return Err(CroSignerError::IncompleteTransaction {
                message: "no signer assigned".to_string(),
            });
        }

        let body = TxBody::new(self.messages, self.memo, self.timeout_height);
        let gas_limit = self.gas_limit.unwrap_or(DEFAULT_GAS_LIMIT);
        let signer_infos = self
            .signers
            .iter()
            .map(|s| SignerInfo::new(&s.public_key, s.account_sequence))
            .collect();
        let auth_info = AuthInfo::new(signer_infos, Fee::new(vec![fee], gas_limit));

        Ok(SignableTransaction::new(
            body.encode(),
            auth_info.encode(),
            network.chain_id.to_string(),
            self.signers,
        ))
    }
}
