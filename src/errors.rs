//! Error types for transaction construction and signing
//!
//! Every failure in the pipeline is fatal to the current build/sign attempt;
//! nothing here is retried internally. `AccountNotFound` is kept distinct from
//! transport failures so callers can tell "the account does not exist on
//! chain" apart from "the node was unreachable".

use thiserror::Error;

/// Error hierarchy for the signing pipeline
#[derive(Error, Debug)]
pub enum CroSignerError {
    /// Mnemonic phrase failed wordlist or checksum validation
    #[error("Invalid mnemonic: {message}")]
    InvalidMnemonic { message: String },

    /// Derivation path string did not parse or could not be derived
    #[error("Invalid derivation path: {message}")]
    InvalidPath { message: String },

    /// Raw private key material has the wrong length
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Key bytes do not form a valid secp256k1 scalar
    #[error("Point not on curve: {message}")]
    PointNotOnCurve { message: String },

    /// Internal ECDSA failure while producing a signature
    #[error("Signing failure: {message}")]
    SigningFailure { message: String },

    /// Monetary amount or gas price was negative
    #[error("Negative amount: {message}")]
    NegativeAmount { message: String },

    /// Amount string did not parse or carries more precision than the unit allows
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    /// Value exceeds the representable range of the target integer type
    #[error("Overflow: {message}")]
    Overflow { message: String },

    /// Transaction is missing messages, a fee, or a signer
    #[error("Incomplete transaction: {message}")]
    IncompleteTransaction { message: String },

    /// Signer index outside the signer list
    #[error("Signer index {index} out of range (signers: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// One or more signer slots lack a signature
    #[error("Missing signatures: {missing} signer slot(s) unsigned")]
    MissingSignatures { missing: usize },

    /// Signature bytes are malformed
    #[error("Invalid signature: {message}")]
    InvalidSignature { message: String },

    /// Bech32 address failed to encode or validate
    #[error("Invalid address: {message}")]
    InvalidAddress { message: String },

    /// Protobuf wire data could not be decoded
    #[error("Decode error: {message}")]
    DecodeError { message: String },

    /// Account does not exist on chain
    #[error("Account not found: {address}")]
    AccountNotFound { address: String },

    /// HTTP transport failure
    #[error("Network error for {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Node returned a payload that could not be interpreted
    #[error("Bad response: {message}")]
    BadResponse { message: String },
}

/// Result alias used throughout the crate
pub type CroSignerResult<T> = Result<T, CroSignerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CroSignerError::InvalidKeyLength {
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "Invalid key length: expected 32 bytes, got 31"
        );
    }

    #[test]
    fn test_account_not_found_display() {
        let err = CroSignerError::AccountNotFound {
            address: "tcro1xyz".to_string(),
        };
        assert!(err.to_string().contains("tcro1xyz"));
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = CroSignerError::IndexOutOfRange { index: 2, len: 1 };
        assert_eq!(err.to_string(), "Signer index 2 out of range (signers: 1)");
    }
}
