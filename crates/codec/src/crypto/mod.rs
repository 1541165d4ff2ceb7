//! AES-256-GCM seal/open primitives.
//!
//! This module never sees key storage or transport. It validates lengths,
//! draws nonces from the OS CSPRNG, and delegates to the RustCrypto
//! `aes-gcm` implementation.
//!
//! # Sealed message layout
//!
//! ```text
//! binary: nonce (12) || ciphertext || tag (16)
//! text:   v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix leaves room for a future algorithm change without
//! breaking existing sealed values.

pub mod cipher;
pub mod message;
