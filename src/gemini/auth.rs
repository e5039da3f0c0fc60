//! API key lookup: environment first, then the system keyring

use keyring::Entry;

use super::error::GeminiError;

/// Service name for keyring storage
const SERVICE_NAME: &str = "smart-tutor";
/// Entry name for the API key
const API_KEY_ENTRY: &str = "gemini-api-key";
/// Environment variables checked, in order
const ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Where the active key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment(&'static str),
    Keyring,
}

/// Manages the Gemini API key
pub struct ApiKeyManager;

impl ApiKeyManager {
    /// Resolve the API key from the environment or the keyring
    pub fn get_api_key() -> Result<String, GeminiError> {
        Self::resolve().map(|(key, _)| key)
    }

    /// Resolve the API key and report where it was found
    pub fn resolve() -> Result<(String, KeySource), GeminiError> {
        let from_env = ENV_VARS.iter().find_map(|name| {
            std::env::var(name)
                .ok()
                .and_then(non_blank)
                .map(|key| (key, KeySource::Environment(*name)))
        });
        if let Some(found) = from_env {
            return Ok(found);
        }

        Self::get_stored_key().map(|key| (key, KeySource::Keyring))
    }

    /// Get the API key from system keyring
    pub fn get_stored_key() -> Result<String, GeminiError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        let key = entry.get_password().map_err(|e| match e {
            keyring::Error::NoEntry => GeminiError::ApiKeyNotFound,
            _ => GeminiError::KeyringError(e.to_string()),
        })?;
        non_blank(key).ok_or(GeminiError::ApiKeyNotFound)
    }

    /// Store the API key in system keyring
    pub fn set_api_key(key: &str) -> Result<(), GeminiError> {
        let key = key.trim();
        if !Self::validate_key_format(key) {
            return Err(GeminiError::InvalidApiKey);
        }

        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        entry.set_password(key).map_err(|e| GeminiError::KeyringError(e.to_string()))
    }

    /// Delete the stored API key
    pub fn delete_api_key() -> Result<(), GeminiError> {
        let entry = Entry::new(SERVICE_NAME, API_KEY_ENTRY)
            .map_err(|e| GeminiError::KeyringError(e.to_string()))?;

        entry.delete_credential().map_err(|e| GeminiError::KeyringError(e.to_string()))
    }

    /// Validate API key format
    fn validate_key_format(key: &str) -> bool {
        key.starts_with("AIza") && key.len() > 30
    }

    /// Mask an API key for display (show first 8 and last 4 chars)
    pub fn mask_key(key: &str) -> String {
        if key.len() <= 12 || !key.is_ascii() {
            return "*".repeat(key.chars().count());
        }
        let prefix = &key[..8];
        let suffix = &key[key.len() - 4..];
        format!("{}...{}", prefix, suffix)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_format() {
        assert!(ApiKeyManager::validate_key_format("AIzaSyA1234567890abcdefghijklmnopqrs"));
        assert!(!ApiKeyManager::validate_key_format("sk-ant-REDACTED"));
        assert!(!ApiKeyManager::validate_key_format("AIzaShort"));
    }

    #[test]
    fn mask_key() {
        let masked = ApiKeyManager::mask_key("AIzaSyA1234567890abcdefghijklmnopqrs");
        assert!(masked.starts_with("AIzaSyA1"));
        assert!(masked.ends_with("pqrs"));
        assert!(masked.contains("..."));
    }

    #[test]
    fn mask_short_key_fully() {
        assert_eq!(ApiKeyManager::mask_key("short"), "*****");
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(non_blank("   ".into()), None);
        assert_eq!(non_blank(" key ".into()), Some("key".into()));
    }

    #[test]
    fn set_rejects_malformed_key_before_touching_keyring() {
        assert!(matches!(ApiKeyManager::set_api_key("nope"), Err(GeminiError::InvalidApiKey)));
    }
}
