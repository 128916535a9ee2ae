//! Canonical transaction documents
//!
//! The Cosmos-SDK `tx/v1beta1` document types, hand-encoded on the protobuf
//! wire format. Every `encode()` here is deterministic: fixed field order, no
//! timestamps, no randomness. Decode counterparts let a signed payload be
//! re-parsed for inspection and for round-trip verification.

use crate::coin::Coin;
use crate::errors::{CroSignerError, CroSignerResult};
use crate::proto::*;

/// `google.protobuf.Any` — a message wrapped with its type URL
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Any {
    /// Type URL (e.g. `/cosmos.bank.v1beta1.MsgSend`)
    pub type_url: String,
    /// Encoded message bytes
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_string(&mut buf, 1, &self.type_url);
        encode_bytes(&mut buf, 2, &self.value);
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut type_url = String::new();
        let mut value = Vec::new();
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => type_url = expect_string(1, payload)?,
                2 => value = expect_bytes(2, payload)?.to_vec(),
                _ => {}
            }
        }
        Ok(Self { type_url, value })
    }
}

/// Secp256k1 public key document
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PubKey {
    /// Compressed public key bytes (33 bytes)
    pub key: Vec<u8>,
}

impl PubKey {
    pub const TYPE_URL: &'static str = "/cosmos.crypto.secp256k1.PubKey";

    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.key);
        buf
    }

    pub fn to_any(&self) -> Any {
        Any::new(Self::TYPE_URL, self.encode())
    }

    pub fn from_any(any: &Any) -> CroSignerResult<Self> {
        if any.type_url != Self::TYPE_URL {
            return Err(CroSignerError::DecodeError {
                message: format!("unexpected public key type '{}'", any.type_url),
            });
        }
        let mut key = Vec::new();
        for field in FieldIter::new(&any.value) {
            let (number, payload) = field?;
            if number == 1 {
                key = expect_bytes(1, payload)?.to_vec();
            }
        }
        Ok(Self { key })
    }
}

pub(crate) fn encode_coin(coin: &Coin) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_string(&mut buf, 1, coin.denom());
    encode_string(&mut buf, 2, &coin.amount().to_string());
    buf
}

pub(crate) fn decode_coin(bytes: &[u8]) -> CroSignerResult<Coin> {
    let mut denom = String::new();
    let mut amount = String::from("0");
    for field in FieldIter::new(bytes) {
        let (number, payload) = field?;
        match number {
            1 => denom = expect_string(1, payload)?,
            2 => amount = expect_string(2, payload)?,
            _ => {}
        }
    }
    Coin::from_wire(&amount, &denom)
}

/// Transaction fee document: coins plus a gas limit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
    pub payer: String,
    pub granter: String,
}

impl Fee {
    pub fn new(amount: Vec<Coin>, gas_limit: u64) -> Self {
        Self {
            amount,
            gas_limit,
            payer: String::new(),
            granter: String::new(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for coin in &self.amount {
            encode_length_delimited(&mut buf, 1, &encode_coin(coin));
        }
        encode_uint64(&mut buf, 2, self.gas_limit);
        encode_string(&mut buf, 3, &self.payer);
        encode_string(&mut buf, 4, &self.granter);
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut fee = Self::new(Vec::new(), 0);
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => fee.amount.push(decode_coin(expect_bytes(1, payload)?)?),
                2 => fee.gas_limit = expect_varint(2, payload)?,
                3 => fee.payer = expect_string(3, payload)?,
                4 => fee.granter = expect_string(4, payload)?,
                _ => {}
            }
        }
        Ok(fee)
    }
}

/// Transaction body: ordered messages, memo, timeout height
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxBody {
    pub messages: Vec<Any>,
    pub memo: String,
    /// Block height after which the transaction is invalid (0 = never expires)
    pub timeout_height: u64,
}

impl TxBody {
    pub fn new(messages: Vec<Any>, memo: impl Into<String>, timeout_height: u64) -> Self {
        Self {
            messages,
            memo: memo.into(),
            timeout_height,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for msg in &self.messages {
            encode_length_delimited(&mut buf, 1, &msg.encode());
        }
        encode_string(&mut buf, 2, &self.memo);
        encode_uint64(&mut buf, 3, self.timeout_height);
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut body = Self::new(Vec::new(), "", 0);
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => body.messages.push(Any::decode(expect_bytes(1, payload)?)?),
                2 => body.memo = expect_string(2, payload)?,
                3 => body.timeout_height = expect_varint(3, payload)?,
                _ => {}
            }
        }
        Ok(body)
    }
}

/// Signing mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    /// SIGN_MODE_DIRECT — sign the protobuf SignDoc bytes
    Direct = 1,
    /// SIGN_MODE_TEXTUAL
    Textual = 2,
    /// SIGN_MODE_LEGACY_AMINO_JSON
    LegacyAminoJson = 127,
}

impl SignMode {
    fn from_u32(value: u32) -> CroSignerResult<Self> {
        match value {
            1 => Ok(SignMode::Direct),
            2 => Ok(SignMode::Textual),
            127 => Ok(SignMode::LegacyAminoJson),
            other => Err(CroSignerError::DecodeError {
                message: format!("unknown sign mode {other}"),
            }),
        }
    }
}

/// Mode info (single-signer form)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeInfo {
    pub mode: SignMode,
}

impl ModeInfo {
    pub fn direct() -> Self {
        Self {
            mode: SignMode::Direct,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        let mut single = Vec::new();
        encode_uint32(&mut single, 1, self.mode as u32);
        encode_length_delimited(&mut buf, 1, &single);
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut mode = SignMode::Direct;
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            if number == 1 {
                let single = expect_bytes(1, payload)?;
                for inner in FieldIter::new(single) {
                    let (inner_number, inner_payload) = inner?;
                    if inner_number == 1 {
                        mode = SignMode::from_u32(expect_varint(1, inner_payload)? as u32)?;
                    }
                }
            }
        }
        Ok(Self { mode })
    }
}

/// Per-signer metadata bound into the AuthInfo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerInfo {
    pub public_key: Option<Any>,
    pub mode_info: ModeInfo,
    pub sequence: u64,
}

impl SignerInfo {
    /// Signer info for a secp256k1 public key in DIRECT mode
    pub fn new(public_key: &[u8], sequence: u64) -> Self {
        Self {
            public_key: Some(PubKey::new(public_key).to_any()),
            mode_info: ModeInfo::direct(),
            sequence,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        if let Some(pk) = &self.public_key {
            encode_length_delimited(&mut buf, 1, &pk.encode());
        }
        encode_length_delimited(&mut buf, 2, &self.mode_info.encode());
        encode_uint64(&mut buf, 3, self.sequence);
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut info = Self {
            public_key: None,
            mode_info: ModeInfo::direct(),
            sequence: 0,
        };
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => info.public_key = Some(Any::decode(expect_bytes(1, payload)?)?),
                2 => info.mode_info = ModeInfo::decode(expect_bytes(2, payload)?)?,
                3 => info.sequence = expect_varint(3, payload)?,
                _ => {}
            }
        }
        Ok(info)
    }
}

/// Authentication info: signer list plus fee
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: Fee,
}

impl AuthInfo {
    pub fn new(signer_infos: Vec<SignerInfo>, fee: Fee) -> Self {
        Self { signer_infos, fee }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for signer in &self.signer_infos {
            encode_length_delimited(&mut buf, 1, &signer.encode());
        }
        encode_length_delimited(&mut buf, 2, &self.fee.encode());
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut auth = Self::new(Vec::new(), Fee::new(Vec::new(), 0));
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => auth
                    .signer_infos
                    .push(SignerInfo::decode(expect_bytes(1, payload)?)?),
                2 => auth.fee = Fee::decode(expect_bytes(2, payload)?)?,
                _ => {}
            }
        }
        Ok(auth)
    }
}

/// The document whose encoding is signed
///
/// Binds the transaction content to a specific signer's identity (account
/// number) and the chain ID, so a signature cannot be replayed on another
/// chain or account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignDoc {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
}

impl SignDoc {
    pub fn new(
        body_bytes: Vec<u8>,
        auth_info_bytes: Vec<u8>,
        chain_id: impl Into<String>,
        account_number: u64,
    ) -> Self {
        Self {
            body_bytes,
            auth_info_bytes,
            chain_id: chain_id.into(),
            account_number,
        }
    }

    /// The exact byte sequence to sign
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.body_bytes);
        encode_bytes(&mut buf, 2, &self.auth_info_bytes);
        encode_string(&mut buf, 3, &self.chain_id);
        encode_uint64(&mut buf, 4, self.account_number);
        buf
    }
}

/// The final broadcast form: body, auth info, and signatures
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxRaw {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}

impl TxRaw {
    pub fn new(body_bytes: Vec<u8>, auth_info_bytes: Vec<u8>, signatures: Vec<Vec<u8>>) -> Self {
        Self {
            body_bytes,
            auth_info_bytes,
            signatures,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bytes(&mut buf, 1, &self.body_bytes);
        encode_bytes(&mut buf, 2, &self.auth_info_bytes);
        for sig in &self.signatures {
            encode_bytes(&mut buf, 3, sig);
        }
        buf
    }

    pub fn decode(bytes: &[u8]) -> CroSignerResult<Self> {
        let mut raw = Self::new(Vec::new(), Vec::new(), Vec::new());
        for field in FieldIter::new(bytes) {
            let (number, payload) = field?;
            match number {
                1 => raw.body_bytes = expect_bytes(1, payload)?.to_vec(),
                2 => raw.auth_info_bytes = expect_bytes(2, payload)?.to_vec(),
                3 => raw.signatures.push(expect_bytes(3, payload)?.to_vec()),
                _ => {}
            }
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Unit;
    use crate::network::TESTNET_CROESEID_4;

    fn coin(amount: &str) -> Coin {
        Coin::new(amount, Unit::Base, &TESTNET_CROESEID_4).unwrap()
    }

    #[test]
    fn test_any_roundtrip() {
        let any = Any::new("/test.Msg", vec![1, 2, 3]);
        assert_eq!(Any::decode(&any.encode()).unwrap(), any);
    }

    #[test]
    fn test_pubkey_any_roundtrip() {
        let pubkey = PubKey::new(&[2u8; 33]);
        let any = pubkey.to_any();
        assert_eq!(any.type_url, "/cosmos.crypto.secp256k1.PubKey");
        assert_eq!(PubKey::from_any(&any).unwrap(), pubkey);
    }

    #[test]
    fn test_pubkey_wrong_type_url_rejected() {
        let any = Any::new("/cosmos.crypto.ed25519.PubKey", vec![]);
        assert!(PubKey::from_any(&any).is_err());
    }

    #[test]
    fn test_coin_wire_roundtrip() {
        let original = coin("12500");
        let decoded = decode_coin(&encode_coin(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_fee_roundtrip() {
        let fee = Fee::new(vec![coin("12500")], 500_000);
        assert_eq!(Fee::decode(&fee.encode()).unwrap(), fee);
    }

    #[test]
    fn test_tx_body_roundtrip() {
        let body = TxBody::new(
            vec![Any::new("/test.Msg", vec![7, 8])],
            "Random Memo",
            12345,
        );
        assert_eq!(TxBody::decode(&body.encode()).unwrap(), body);
    }

    #[test]
    fn test_tx_body_timeout_zero_not_encoded() {
        let body = TxBody::new(Vec::new(), "", 0);
        assert!(body.encode().is_empty());
        // ...and decodes back to the same defaults
        assert_eq!(TxBody::decode(&[]).unwrap(), body);
    }

    #[test]
    fn test_signer_info_roundtrip() {
        let info = SignerInfo::new(&[3u8; 33], 42);
        let decoded = SignerInfo::decode(&info.encode()).unwrap();
        assert_eq!(decoded, info);
        assert_eq!(decoded.mode_info.mode, SignMode::Direct);
    }

    #[test]
    fn test_auth_info_roundtrip() {
        let auth = AuthInfo::new(
            vec![SignerInfo::new(&[3u8; 33], 1)],
            Fee::new(vec![coin("100")], 200_000),
        );
        assert_eq!(AuthInfo::decode(&auth.encode()).unwrap(), auth);
    }

    #[test]
    fn test_sign_doc_deterministic() {
        let doc = SignDoc::new(vec![1, 2], vec![3, 4], "testnet-croeseid-4", 7);
        assert_eq!(doc.encode(), doc.encode());
        assert!(!doc.encode().is_empty());
    }

    #[test]
    fn test_tx_raw_roundtrip() {
        let raw = TxRaw::new(vec![1, 2], vec![3, 4], vec![vec![5; 64]]);
        assert_eq!(TxRaw::decode(&raw.encode()).unwrap(), raw);
    }
}
