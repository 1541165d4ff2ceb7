//! Sizes and transport forms of a sealed message.
//!
//! The binary layout is fixed:
//!
//! ```text
//! nonce (12 bytes) || ciphertext (len(plaintext) bytes) || tag (16 bytes)
//! ```
//!
//! [`SealedPayload`] carries the same two parts inside a JSON document.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of the GCM authentication tag.
pub const TAG_LEN: usize = 16;

// ---------------------------------------------------------------------------
// JSON transport
// ---------------------------------------------------------------------------

/// JSON form of a sealed message.
///
/// Both fields are standard (padded) base64. `ciphertext` includes the
/// trailing 16-byte tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedPayload {
    /// Base64 of the 12-byte nonce.
    pub nonce: String,
    /// Base64 of ciphertext || tag.
    pub ciphertext: String,
}

impl SealedPayload {
    /// Encode raw nonce and ciphertext bytes.
    pub fn new(nonce: &[u8], ciphertext: &[u8]) -> Self {
        Self {
            nonce: STANDARD.encode(nonce),
            ciphertext: STANDARD.encode(ciphertext),
        }
    }

    /// Decode the nonce, enforcing its length.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] on bad base64,
    /// [`CodecError::InvalidNonceLength`] if it does not decode to 12 bytes.
    pub fn decode_nonce(&self) -> Result<[u8; NONCE_LEN], CodecError> {
        let bytes = STANDARD
            .decode(&self.nonce)
            .map_err(|_| CodecError::InvalidFormat("nonce is not valid base64"))?;
        <[u8; NONCE_LEN]>::try_from(bytes.as_slice())
            .map_err(|_| CodecError::InvalidNonceLength(bytes.len()))
    }

    /// Decode ciphertext || tag.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] on bad base64 or when the value is too
    /// short to hold a tag.
    pub fn decode_ciphertext(&self) -> Result<Vec<u8>, CodecError> {
        let bytes = STANDARD
            .decode(&self.ciphertext)
            .map_err(|_| CodecError::InvalidFormat("ciphertext is not valid base64"))?;
        if bytes.len() < TAG_LEN {
            return Err(CodecError::InvalidFormat("ciphertext shorter than tag"));
        }
        Ok(bytes)
    }

    /// Serialise to a JSON string.
    pub fn to_json(&self) -> String {
        // Two string fields cannot fail to serialise.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parse from a JSON string.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] if the document is not a `SealedPayload`.
    pub fn from_json(s: &str) -> Result<Self, CodecError> {
        serde_json::from_str(s).map_err(|_| CodecError::InvalidFormat("malformed JSON payload"))
    }
}
