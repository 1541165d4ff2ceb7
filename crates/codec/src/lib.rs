//! `codec` — AES-256-GCM authenticated encryption with a fixed sealed-message layout.
//!
//! ```no_run
//! let key = codec::Key::generate();
//! let sealed = codec::seal(key.as_bytes(), b"hello AES-256-GCM", b"header-data")?;
//! let plaintext = codec::open(key.as_bytes(), &sealed.nonce, &sealed.ciphertext, b"header-data")?;
//! assert_eq!(plaintext, b"hello AES-256-GCM");
//! # Ok::<(), codec::CodecError>(())
//! ```

pub mod crypto;
pub mod key;

pub use common::protocol::{SealedPayload, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use common::CodecError;
pub use crypto::cipher::{
    open, open_blob, open_detached, open_message, seal, seal_detached, DetachedSeal,
};
pub use crypto::message::SealedMessage;
pub use key::Key;
