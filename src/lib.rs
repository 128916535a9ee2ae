//! Offline transaction construction and signing for the Crypto.org chain
//!
//! Everything between mnemonic and broadcast payload is pure computation:
//! key derivation, address encoding, fee arithmetic, canonical transaction
//! bytes, and secp256k1 signatures all happen without touching the network.
//! [`ChainClient`] covers the two places a node is actually needed, the
//! account lookup before signing and the broadcast after.
//!
//! ```no_run
//! use cro_signer::{
//!     compute_fee, Coin, KeyPair, MsgSend, RawTransaction, Signer, Unit,
//!     TESTNET_CROESEID_4,
//! };
//!
//! # fn main() -> cro_signer::CroSignerResult<()> {
//! let network = TESTNET_CROESEID_4;
//! let keypair = KeyPair::from_mnemonic("<mnemonic>", &network.derivation_path(0))?;
//!
//! let msg = MsgSend::new(
//!     keypair.address(&network)?,
//!     "tcro165tzcrh2yl83g8qeqxueg2g5gzgu57y3fe3kc3",
//!     vec![Coin::new("1000", Unit::Base, &network)?],
//! );
//! let signable = RawTransaction::new()
//!     .append_message(&msg)
//!     .set_fee(compute_fee(500_000, "0.025", &network)?)
//!     .set_gas_limit(500_000)
//!     .add_signer(Signer {
//!         public_key: *keypair.public_key(),
//!         account_number: 0,
//!         account_sequence: 0,
//!     })
//!     .to_signable(&network)?;
//!
//! let signature = keypair.sign(&signable.to_sign_doc(0)?)?;
//! let signed = signable.set_signature(0, signature)?.to_signed()?;
//! println!("{} {}", signed.tx_hash(), signed.to_hex());
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod client;
pub mod coin;
pub mod errors;
pub mod keys;
pub mod network;
pub mod proto;
pub mod signature;
pub mod tx;

pub use address::{public_key_to_address, validate_address};
pub use client::{Account, ChainClient};
pub use coin::{compute_fee, Coin, Unit};
pub use errors::{CroSignerError, CroSignerResult};
pub use keys::{derive_priv_key, derive_priv_key_at, mnemonic_to_seed, verify_signature, KeyPair};
pub use network::{Network, DISPLAY_DECIMALS, MAINNET, TESTNET_CROESEID_4};
pub use signature::Signature;
pub use tx::{
    Msg, MsgSend, RawTransaction, SignableTransaction, SignedTransaction, Signer,
    DEFAULT_GAS_LIMIT,
};
