//! Common error type and transport definitions shared across `gcm-seal` crates.

pub mod error;
pub mod protocol;

pub use error::CodecError;
