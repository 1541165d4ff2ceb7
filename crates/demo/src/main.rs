//! `demo` — seals and opens one message with the codec.
//!
//! Startup sequence:
//! 1. Load and validate [`config::Config`] from environment variables.
//! 2. Initialise structured JSON logging.
//! 3. Seal the configured message, print its text form, open it again, and
//!    confirm that a mismatched AAD is rejected.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use codec::CodecError;
use tracing::{info, warn};

/// AAD that must never authenticate the demo message.
const TAMPER_AAD: &[u8] = b"wrong";

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: demo configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;
    let key_source = if cfg.demo_key.is_some() {
        "configured"
    } else {
        "generated"
    };
    info!(version = env!("CARGO_PKG_VERSION"), key_source, "demo starting");

    // -----------------------------------------------------------------------
    // 3. Seal, open, tamper check
    // -----------------------------------------------------------------------
    let key = cfg.key()?;
    let aad = cfg.demo_aad.as_bytes();

    let sealed = codec::seal(key.as_bytes(), cfg.demo_message.as_bytes(), aad)
        .context("failed to seal demo message")?;
    info!(
        nonce_len = sealed.nonce.len(),
        sealed_len = sealed.ciphertext.len(),
        "message sealed"
    );
    println!("Sealed: {}", sealed.to_string_repr());

    let plaintext = codec::open_message(key.as_bytes(), &sealed, aad)
        .context("failed to open demo message")?;
    println!("Decrypted: {}", String::from_utf8_lossy(&plaintext));

    match codec::open_message(key.as_bytes(), &sealed, TAMPER_AAD) {
        Err(CodecError::AuthenticationFailure) => {
            info!("mismatched AAD rejected");
        }
        Err(e) => {
            warn!(code = e.code(), "unexpected error for mismatched AAD");
            return Err(e).context("tamper check failed");
        }
        Ok(_) => anyhow::bail!("message opened with mismatched AAD"),
    }

    Ok(())
}
