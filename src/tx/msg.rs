//! Transaction messages
//!
//! Messages are anything that can wrap itself in a `google.protobuf.Any`.
//! The bank transfer message is the one variant implemented here; the trait
//! keeps the model open for other message types.

use super::types::{decode_coin, encode_coin, Any};
use crate::coin::Coin;
use crate::errors::{CroSignerError, CroSignerResult};
use crate::proto::{encode_length_delimited, encode_string, expect_bytes, expect_string, FieldIter};

/// A message that can be embedded in a transaction body
pub trait Msg {
    /// Protobuf type URL
    fn type_url(&self) -> &'static str;

    /// Encoded message payload (the `Any.value` bytes)
    fn encode_value(&self) -> Vec<u8>;

    /// Wrap as an `Any`
    fn to_any(&self) -> Any {
        Any::new(self.type_url(), self.encode_value())
    }
}

/// Bank transfer message (`MsgSend`)
///
/// `from_address` must be the address of the signer that later signs the
/// transaction; the builder does not enforce this, the chain does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MsgSend {
    pub from_address: String,
    pub to_address: String,
    pub amount: Vec<Coin>,
}

impl MsgSend {
    pub const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";

    pub fn new(
        from_address: impl Into<String>,
        to_address: impl Into<String>,
        amount: Vec<Coin>,
    ) -> Self {
        Self {
            from_address: from_address.into(),
            to_address: to_address.into(),
            amount,
        }
    }

    /// Decode from an `Any` wrapper, checking the type URL
    pub fn from_any(any: &Any) -> CroSignerResult<Self> {
        if any.type_url != Self::TYPE_URL {
            return Err(CroSignerError::DecodeError {
                message: format!("unexpected message type '{}'", any.type_url),
            });
        }
        let mut msg = Self::new("", "", Vec::new());
        for field in FieldIter::new(&any.value) {
            let (number, payload) = field?;
            match number {
                1 => msg.from_address = expect_string(1, payload)?,
                2 => msg.to_address = expect_string(2, payload)?,
                3 => msg.amount.push(decode_coin(expect_bytes(3, payload)?)?),
                _ => {}
            }
        }
        Ok(msg)
    }
}

impl Msg for MsgSend {
    fn type_url(&self) -> &'static str {
        Self::TYPE_URL
    }

    fn encode_value(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.from_address);
        encode_string(&mut buf, 2, &self.to_address);
        for coin in &self.amount {
            encode_length_delimited(&mut buf, 3, &encode_coin(coin));
        }
        buf
    }
}
