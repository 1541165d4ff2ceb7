//! AES-256-GCM sealing and opening.
//!
//! **Nonce discipline:** every [`seal`] draws a fresh 96-bit nonce from the
//! OS CSPRNG. GCM nonce reuse under one key breaks both confidentiality and
//! authentication, so there is no public entry point that accepts a
//! caller-chosen nonce for encryption.

use aes_gcm::{
    aead::{rand_core::RngCore, Aead, AeadInPlace, KeyInit, OsRng, Payload},
    Aes256Gcm, Nonce, Tag,
};
use common::protocol::{KEY_LEN, NONCE_LEN, TAG_LEN};
use common::CodecError;
use tracing::debug;
use zeroize::Zeroize;

use super::message::SealedMessage;

/// Output of [`seal_detached`]: the three parts kept apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachedSeal {
    /// Nonce used for this message.
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Authentication tag over ciphertext and AAD.
    pub tag: [u8; TAG_LEN],
}

/// Encrypt `plaintext` under `key`, binding it to `aad`.
///
/// Pass `&[]` as `aad` when there is no associated data.
///
/// # Errors
///
/// Returns [`CodecError::InvalidKeyLength`] if `key` is not [`KEY_LEN`] bytes.
/// Returns [`CodecError::EncryptionFailure`] if the primitive rejects the
/// input (unreachable for a valid key).
pub fn seal(key: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<SealedMessage, CodecError> {
    let cipher = build_cipher(key)?;
    seal_with(&cipher, random_nonce(), plaintext, aad)
}

/// Decrypt and verify `sealed` (ciphertext || tag) under `key` and `nonce`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidKeyLength`] or [`CodecError::InvalidNonceLength`]
/// on bad lengths (key checked first), and [`CodecError::AuthenticationFailure`]
/// if the tag does not verify. No plaintext is returned on failure.
pub fn open(key: &[u8], nonce: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>, CodecError> {
    let cipher = build_cipher(key)?;
    let nonce = parse_nonce(nonce)?;
    open_with(&cipher, &nonce, sealed, aad)
}

/// Open a parsed [`SealedMessage`].
///
/// # Errors
///
/// Same as [`open`].
pub fn open_message(
    key: &[u8],
    message: &SealedMessage,
    aad: &[u8],
) -> Result<Vec<u8>, CodecError> {
    open(key, &message.nonce, &message.ciphertext, aad)
}

/// Open a binary sealed blob laid out as `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidFormat`] if `blob` is too short to hold a
/// nonce and a tag, otherwise the same errors as [`open`].
pub fn open_blob(key: &[u8], blob: &[u8], aad: &[u8]) -> Result<Vec<u8>, CodecError> {
    // Key errors take precedence over format errors.
    let cipher = build_cipher(key)?;
    let message = SealedMessage::from_bytes(blob)?;
    open_with(&cipher, &message.nonce, &message.ciphertext, aad)
}

/// Like [`seal`], but returns ciphertext and tag as separate buffers.
///
/// # Errors
///
/// Same as [`seal`].
pub fn seal_detached(
    key: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<DetachedSeal, CodecError> {
    let cipher = build_cipher(key)?;
    let nonce = random_nonce();
    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), aad, &mut buffer)
        .map_err(|_| CodecError::EncryptionFailure)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok(DetachedSeal {
        nonce,
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Verify `tag` and decrypt a detached `ciphertext`.
///
/// # Errors
///
/// Length errors for key, nonce, then tag ([`CodecError::InvalidTagLength`]);
/// [`CodecError::AuthenticationFailure`] if the tag does not verify.
pub fn open_detached(
    key: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CodecError> {
    let cipher = build_cipher(key)?;
    let nonce = parse_nonce(nonce)?;
    if tag.len() != TAG_LEN {
        return Err(CodecError::InvalidTagLength(tag.len()));
    }

    let mut buffer = ciphertext.to_vec();
    match cipher.decrypt_in_place_detached(
        Nonce::from_slice(&nonce),
        aad,
        &mut buffer,
        Tag::from_slice(tag),
    ) {
        Ok(()) => Ok(buffer),
        Err(_) => {
            // The primitive may have applied the keystream before comparing tags.
            buffer.zeroize();
            debug!(
                ciphertext_len = ciphertext.len(),
                aad_len = aad.len(),
                "tag verification failed"
            );
            Err(CodecError::AuthenticationFailure)
        }
    }
}

/// Seal with an explicit nonce. Only for known-answer tests.
#[cfg(test)]
pub(crate) fn seal_with_nonce(
    key: &[u8],
    nonce: [u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedMessage, CodecError> {
    let cipher = build_cipher(key)?;
    seal_with(&cipher, nonce, plaintext, aad)
}

fn open_with(
    cipher: &Aes256Gcm,
    nonce: &[u8; NONCE_LEN],
    sealed: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CodecError> {
    if sealed.len() < TAG_LEN {
        debug!(sealed_len = sealed.len(), "sealed bytes shorter than tag");
        return Err(CodecError::AuthenticationFailure);
    }
    cipher
        .decrypt(Nonce::from_slice(nonce), Payload { msg: sealed, aad })
        .map_err(|_| {
            debug!(
                sealed_len = sealed.len(),
                aad_len = aad.len(),
                "tag verification failed"
            );
            CodecError::AuthenticationFailure
        })
}

fn seal_with(
    cipher: &Aes256Gcm,
    nonce: [u8; NONCE_LEN],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<SealedMessage, CodecError> {
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), Payload { msg: plaintext, aad })
        .map_err(|_| CodecError::EncryptionFailure)?;
    debug!(plaintext_len = plaintext.len(), aad_len = aad.len(), "sealed message");
    Ok(SealedMessage::new(nonce, ciphertext))
}

fn random_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

fn parse_nonce(nonce: &[u8]) -> Result<[u8; NONCE_LEN], CodecError> {
    <[u8; NONCE_LEN]>::try_from(nonce).map_err(|_| CodecError::InvalidNonceLength(nonce.len()))
}

fn build_cipher(key: &[u8]) -> Result<Aes256Gcm, CodecError> {
    if key.len() != KEY_LEN {
        return Err(CodecError::InvalidKeyLength(key.len()));
    }
    Aes256Gcm::new_from_slice(key).map_err(|_| CodecError::InvalidKeyLength(key.len()))
}
