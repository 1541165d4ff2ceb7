//! Configuration loading and validation for the demo binary.

use anyhow::{Context, Result};
use codec::Key;
use serde::Deserialize;
use zeroize::Zeroizing;

/// Validated demo configuration, read from environment variables.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Message to seal (`DEMO_MESSAGE`).
    #[serde(default = "default_demo_message")]
    pub demo_message: String,

    /// Associated data bound to the message (`DEMO_AAD`).
    #[serde(default = "default_demo_aad")]
    pub demo_aad: String,

    /// Standard-base64 32-byte key (`DEMO_KEY`). A random key is generated
    /// when absent. Wiped when the config is dropped.
    #[serde(default)]
    pub demo_key: Option<Zeroizing<String>>,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_demo_message() -> String {
    "hello AES-256-GCM".into()
}
fn default_demo_aad() -> String {
    "header-data".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build demo configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise demo configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Key from `DEMO_KEY`, or a freshly generated one.
    pub fn key(&self) -> Result<Key> {
        match &self.demo_key {
            Some(encoded) => Key::from_base64(encoded).context("DEMO_KEY is not a usable key"),
            None => Ok(Key::generate()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        if self.demo_aad == "wrong" {
            anyhow::bail!("DEMO_AAD must differ from the tamper-check AAD \"wrong\"");
        }
        if self.demo_key.is_some() {
            self.key()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("demo_message_len", &self.demo_message.len())
            .field("demo_aad_len", &self.demo_aad.len())
            .field("demo_key", &self.demo_key.as_ref().map(|_| "[REDACTED]"))
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_setting(encoded: &str) -> Zeroizing<String> {
        Zeroizing::new(encoded.to_owned())
    }

    fn valid() -> Config {
        Config {
            demo_message: default_demo_message(),
            demo_aad: default_demo_aad(),
            demo_key: None,
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults() {
        assert_eq!(default_demo_message(), "hello AES-256-GCM");
        assert_eq!(default_demo_aad(), "header-data");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_log_level() {
        let cfg = Config {
            log_level: " ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_tamper_aad() {
        let cfg = Config {
            demo_aad: "wrong".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_key() {
        let cfg = Config {
            demo_key: Some(key_setting("AAAA")),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn configured_key_is_used() {
        // 32 zero bytes.
        let cfg = Config {
            demo_key: Some(key_setting("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=")),
            ..valid()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.key().unwrap().as_bytes(), &[0u8; 32]);
    }

    #[test]
    fn key_setting_deserialises_into_wiped_buffer() {
        let cfg = config::Config::builder()
            .set_override("demo_key", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=")
            .unwrap()
            .build()
            .unwrap();
        let c: Config = cfg.try_deserialize().unwrap();
        let stored: &Zeroizing<String> = c.demo_key.as_ref().unwrap();
        assert_eq!(stored.as_str(), "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=");
        assert_eq!(c.demo_message, "hello AES-256-GCM");
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config {
            demo_key: Some(key_setting("c2VjcmV0")),
            ..valid()
        };
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("c2VjcmV0"));
        assert!(printed.contains("REDACTED"));
    }
}
