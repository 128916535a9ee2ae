//! Transaction assembly, canonicalization, and signing
//!
//! The pipeline: [`RawTransaction`] accumulates messages, fee, memo, and
//! timeout; `to_signable()` snapshots it into canonical bytes; the
//! [`SignableTransaction`] yields per-signer SignDoc bytes and collects
//! signatures; `to_signed()` seals the immutable [`SignedTransaction`].

mod builder;
mod msg;
mod signable;
pub mod types;

pub use builder::{RawTransaction, Signer, DEFAULT_GAS_LIMIT};
pub use msg::{Msg, MsgSend};
pub use signable::{SignableTransaction, SignedTransaction};
