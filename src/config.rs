//! Integration configuration
//!
//! Read from a JSON file. Every field has a default, so a partial file (or
//! `{}`) is valid:
//!
//! ```json
//! {
//!   "database": { "path": "wialink.db" },
//!   "wialon": { "token": "...", "creator_id": 27881459, "password_length": 8 }
//! }
//! ```

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::crypto::password::MIN_REQUESTED_LENGTH;
use crate::error::{IntegrationError, Result};
use crate::{DEFAULT_CREATOR_ID, DEFAULT_DATABASE_PATH, DEFAULT_PASSWORD_LENGTH};

/// Database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, or `:memory:`
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

/// Wialon account settings
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WialonConfig {
    /// API token used for `token/login`
    pub token: String,
    /// Account that owns newly created users
    pub creator_id: i64,
    /// Requested password length (the generated one is one longer)
    pub password_length: usize,
}

impl Default for WialonConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            creator_id: DEFAULT_CREATOR_ID,
            password_length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

impl std::fmt::Debug for WialonConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WialonConfig")
            .field("token", &crate::utils::mask_secret(&self.token))
            .field("creator_id", &self.creator_id)
            .field("password_length", &self.password_length)
            .finish()
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationConfig {
    pub database: DatabaseConfig,
    pub wialon: WialonConfig,
}

impl IntegrationConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would only fail later, deep inside a provisioning run
    pub fn validate(&self) -> Result<()> {
        if self.wialon.password_length < MIN_REQUESTED_LENGTH {
            return Err(IntegrationError::ConfigError(format!(
                "wialon.password_length must be at least {}",
                MIN_REQUESTED_LENGTH
            )));
        }
        if self.wialon.creator_id <= 0 {
            return Err(IntegrationError::ConfigError(
                "wialon.creator_id must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Token for opening a session; errors when none is configured
    pub fn token(&self) -> Result<&str> {
        if self.wialon.token.is_empty() {
            return Err(IntegrationError::ConfigError("wialon.token is not set".to_string()));
        }
        Ok(&self.wialon.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_object() {
        let config = IntegrationConfig::from_json("{}").unwrap();
        assert_eq!(config, IntegrationConfig::default());
        assert_eq!(config.wialon.creator_id, 27881459);
        assert_eq!(config.wialon.password_length, 8);
        assert_eq!(config.database.path, PathBuf::from("wialink.db"));
    }

    #[test]
    fn test_partial_config() {
        let config = IntegrationConfig::from_json(r#"{ "wialon": { "token": "abc" } }"#).unwrap();
        assert_eq!(config.token().unwrap(), "abc");
        assert_eq!(config.wialon.password_length, DEFAULT_PASSWORD_LENGTH);
    }

    #[test]
    fn test_missing_token() {
        let config = IntegrationConfig::default();
        assert!(matches!(config.token(), Err(IntegrationError::ConfigError(_))));
    }

    #[test]
    fn test_short_password_length_rejected() {
        let result = IntegrationConfig::from_json(r#"{ "wialon": { "password_length": 3 } }"#);
        assert!(matches!(result, Err(IntegrationError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_creator_id_rejected() {
        let result = IntegrationConfig::from_json(r#"{ "wialon": { "creator_id": 0 } }"#);
        assert!(matches!(result, Err(IntegrationError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_json() {
        let result = IntegrationConfig::from_json("{ wialon");
        assert!(matches!(result, Err(IntegrationError::ConfigError(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "database": { "path": ":memory:" }, "wialon": { "token": "t", "creator_id": 5 } }"#).unwrap();

        let config = IntegrationConfig::load(&path).unwrap();
        assert_eq!(config.database.path, PathBuf::from(":memory:"));
        assert_eq!(config.wialon.creator_id, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = IntegrationConfig::load(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(IntegrationError::IoError(_))));
    }

    #[test]
    fn test_debug_masks_token() {
        let config = IntegrationConfig::from_json(r#"{ "wialon": { "token": "supersecret" } }"#).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("supersecret"));
    }
}
