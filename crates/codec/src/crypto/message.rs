//! [`SealedMessage`]: a nonce paired with ciphertext || tag, and its encodings.

use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use common::protocol::{SealedPayload, NONCE_LEN, TAG_LEN};
use common::CodecError;

/// Prefix that appears at the start of every text-encoded sealed message.
pub const VERSION_PREFIX: &str = "v1";

/// A sealed message.
///
/// Binary form is `nonce || ciphertext || tag`; the text form is
/// `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext followed by the 16-byte authentication tag.
    pub ciphertext: Vec<u8>,
}

impl SealedMessage {
    /// Pair a nonce with ciphertext || tag.
    pub fn new(nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self { nonce, ciphertext }
    }

    /// Split into `(nonce, ciphertext || tag)`.
    pub fn into_parts(self) -> ([u8; NONCE_LEN], Vec<u8>) {
        (self.nonce, self.ciphertext)
    }

    /// Borrow ciphertext and tag separately.
    ///
    /// A value shorter than the tag yields an empty ciphertext and a short tag;
    /// opening it fails authentication.
    pub fn ciphertext_and_tag(&self) -> (&[u8], &[u8]) {
        let split = self.ciphertext.len().saturating_sub(TAG_LEN);
        self.ciphertext.split_at(split)
    }

    /// Encode as `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the binary form.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidFormat`] if `bytes` cannot hold a nonce
    /// and a tag.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CodecError::InvalidFormat("sealed blob shorter than nonce and tag"));
        }
        let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        Ok(Self::new(nonce, ciphertext.to_vec()))
    }

    /// Encode this value to its canonical string representation.
    pub fn to_string_repr(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// JSON transport form.
    pub fn to_payload(&self) -> SealedPayload {
        SealedPayload::new(&self.nonce, &self.ciphertext)
    }
}

impl FromStr for SealedMessage {
    type Err = CodecError;

    /// Parse the `v1.<nonce>.<ciphertext>` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CodecError::InvalidFormat("expected v1.<nonce>.<ciphertext>"));
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CodecError::InvalidFormat("nonce is not valid base64url"))?;
        let nonce = <[u8; NONCE_LEN]>::try_from(nonce_bytes.as_slice())
            .map_err(|_| CodecError::InvalidFormat("nonce has wrong length"))?;

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CodecError::InvalidFormat("ciphertext is not valid base64url"))?;
        if ciphertext.len() < TAG_LEN {
            return Err(CodecError::InvalidFormat("ciphertext shorter than tag"));
        }

        Ok(Self::new(nonce, ciphertext))
    }
}

impl TryFrom<&SealedPayload> for SealedMessage {
    type Error = CodecError;

    fn try_from(payload: &SealedPayload) -> Result<Self, Self::Error> {
        Ok(Self::new(payload.decode_nonce()?, payload.decode_ciphertext()?))
    }
}
