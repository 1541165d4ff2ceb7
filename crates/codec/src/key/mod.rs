//! [`Key`]: caller-owned AES-256 key material.
//!
//! # Security invariants
//!
//! - Key bytes are **never** printed, not even through `Debug`.
//! - The buffer is overwritten with zeroes when the key is dropped.
//! - Storage and rotation belong to the caller; this type only holds bytes.

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::protocol::KEY_LEN;
use common::CodecError;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of key material.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_LEN],
}

impl Key {
    /// Generate a fresh key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut key = Self {
            bytes: [0u8; KEY_LEN],
        };
        OsRng.fill_bytes(&mut key.bytes);
        key
    }

    /// Copy key material out of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyLength`] if the slice has the wrong length.
    pub fn from_slice(key_bytes: &[u8]) -> Result<Self, CodecError> {
        if key_bytes.len() != KEY_LEN {
            return Err(CodecError::InvalidKeyLength(key_bytes.len()));
        }
        let mut key = Self {
            bytes: [0u8; KEY_LEN],
        };
        key.bytes.copy_from_slice(key_bytes);
        Ok(key)
    }

    /// Decode a standard-base64 key, as supplied through configuration.
    ///
    /// # Errors
    ///
    /// [`CodecError::InvalidFormat`] on bad base64, otherwise as [`Key::from_slice`].
    pub fn from_base64(encoded: &str) -> Result<Self, CodecError> {
        let decoded = Zeroizing::new(
            STANDARD
                .decode(encoded.trim())
                .map_err(|_| CodecError::InvalidFormat("key is not valid base64"))?,
        );
        Self::from_slice(&decoded)
    }

    /// Borrow the raw key bytes for [`crate::seal`] / [`crate::open`].
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}
