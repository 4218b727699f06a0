//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so the operator's API key never shows up in logs,
//! debug output, or error messages.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// True when the secret is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> serde::Deserialize<'de> for SecretString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug() {
        let secret = SecretString::new("fc-super-secret-key");
        let debug = format!("{:?}", secret);
        assert!(!debug.contains("fc-super"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_secret_not_in_display() {
        let secret = SecretString::new("fc-super-secret-key");
        assert_eq!(format!("{}", secret), "[REDACTED]");
    }

    #[test]
    fn test_expose_and_blank() {
        assert_eq!(SecretString::new("fc-key").expose(), "fc-key");
        assert!(SecretString::new("   ").is_blank());
        assert!(!SecretString::from("fc-key").is_blank());
    }

    #[test]
    fn test_deserialize_from_json_string() {
        let secret: SecretString = serde_json::from_str("\"fc-json\"").unwrap();
        assert_eq!(secret.expose(), "fc-json");
    }
}
