//! Common error type returned by every codec operation.

use thiserror::Error;

/// Errors produced by sealing, opening, and parsing sealed messages.
///
/// Every variant is local and deterministic. None of them is worth retrying
/// with the same inputs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The key is not exactly 32 bytes. Carries the length that was supplied.
    #[error("invalid key length: expected 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The nonce is not exactly 12 bytes.
    #[error("invalid nonce length: expected 12 bytes, got {0}")]
    InvalidNonceLength(usize),

    /// A detached authentication tag is not exactly 16 bytes.
    #[error("invalid tag length: expected 16 bytes, got {0}")]
    InvalidTagLength(usize),

    /// The tag did not verify. The ciphertext, nonce, AAD, or key is wrong,
    /// or the message was tampered with.
    #[error("authentication failed")]
    AuthenticationFailure,

    /// A binary, text, or JSON sealed message is structurally malformed.
    #[error("invalid sealed message format: {0}")]
    InvalidFormat(&'static str),

    /// The AEAD primitive refused to encrypt (unreachable for valid lengths).
    #[error("encryption failed")]
    EncryptionFailure,
}

impl CodecError {
    /// Stable machine-readable identifier, safe to put in log fields.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidKeyLength(_) => "invalid_key_length",
            CodecError::InvalidNonceLength(_) => "invalid_nonce_length",
            CodecError::InvalidTagLength(_) => "invalid_tag_length",
            CodecError::AuthenticationFailure => "authentication_failure",
            CodecError::InvalidFormat(_) => "invalid_format",
            CodecError::EncryptionFailure => "encryption_failure",
        }
    }

    /// Returns `true` when the error means the sealed data must be treated
    /// as tampered or corrupted.
    pub fn is_tampering(&self) -> bool {
        matches!(self, CodecError::AuthenticationFailure)
    }
}
