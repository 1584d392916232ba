//! Secure credential handling using the secrecy crate
//!
//! The inference endpoint credential is held as a [`SecretString`]. Memory is
//! zeroed on drop, `Debug` output is redacted, and the value is only reachable
//! through `expose_secret()` at the point the `Authorization` header is built.
//!
//! # Example
//!
//! ```rust
//! use pii_curator::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let api_key = secret_string("nvapi-123".to_string());
//! assert_eq!(api_key.expose_secret(), "nvapi-123");
//! assert!(!format!("{api_key:?}").contains("nvapi-123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// String newtype that satisfies the `secrecy` marker traits
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Whether the credential is empty (treated as "no credential")
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Credential string held in a zeroizing `Secret`
pub type SecretString = Secret<SecretValue>;

/// Wrap a `String` as a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Wrap an optional `String` as an optional [`SecretString`]
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_opt() {
        assert!(secret_string_opt(None).is_none());
        let key = secret_string_opt(Some("k".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "k");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("nvapi-sensitive".to_string());
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("nvapi-sensitive"));
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(secret_string("  ".to_string()).expose_secret().is_empty());
    }

    #[test]
    fn test_secret_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Endpoint {
            api_key: SecretString,
        }

        let endpoint: Endpoint = toml::from_str(r#"api_key = "abc""#).unwrap();
        assert_eq!(endpoint.api_key.expose_secret(), "abc");
    }
}
