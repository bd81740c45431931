//! Secure credential handling for generative-language backends.
//!
//! - **No accidental logging**: credentials never appear in Debug/Display output
//! - **Memory safety**: credentials are zeroed on drop (`secrecy`)
//! - **Explicit exposure**: the raw value is only reachable via `.expose()`
//!
//! ## Usage
//!
//! ```ignore
//! use leiclara_runtime::providers::{ApiCredential, CredentialSource};
//!
//! let cred = ApiCredential::from_env(&["GEMINI_API_KEY", "API_KEY"], "Gemini API key")?;
//! request.query(&[("key", cred.expose())]);
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::ProviderError;

/// Where a credential was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from a settings or `.env` file
    Config,
    /// Loaded from an environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Config => write!(f, "config"),
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Create a new credential from a string value.
    ///
    /// Surrounding whitespace is trimmed before the value is wrapped.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        let value: String = value.into();
        Self {
            value: SecretString::from(value.trim().to_string()),
            source,
            name,
        }
    }

    /// Wrap an optional value, treating blank strings as absent.
    pub fn from_optional(
        value: Option<&str>,
        source: CredentialSource,
        name: &'static str,
    ) -> Option<Self> {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| Self::new(v, source, name))
    }

    /// Load from the first set, non-blank environment variable in `env_vars`.
    pub fn from_env(env_vars: &[&str], name: &'static str) -> Result<Self, ProviderError> {
        env_vars
            .iter()
            .find_map(|var| {
                let value = std::env::var(var).ok()?;
                Self::from_optional(Some(&value), CredentialSource::Environment, name)
            })
            .ok_or_else(|| {
                ProviderError::NotConfigured(format!(
                    "{} not set: configure one of {:?}",
                    name, env_vars
                ))
            })
    }

    /// Expose the credential value for use in API calls.
    ///
    /// Only call this where the credential is actually sent. Never store the
    /// exposed value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Clone for ApiCredential {
    fn clone(&self) -> Self {
        Self {
            value: SecretString::from(self.value.expose_secret().to_string()),
            source: self.source,
            name: self.name,
        }
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_redacted_in_debug() {
        let secret = "AIza-super-secret-key-12345";
        let cred = ApiCredential::new(secret, CredentialSource::Programmatic, "Gemini API key");

        let debug = format!("{:?}", cred);
        assert!(!debug.contains(secret), "Secret exposed in Debug!");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_redacted_in_display() {
        let secret = "AIza-super-secret-key-12345";
        let cred = ApiCredential::new(secret, CredentialSource::Config, "Gemini API key");

        let display = format!("{}", cred);
        assert!(!display.contains(secret), "Secret exposed in Display!");
        assert!(display.contains("Gemini API key"));
        assert!(display.contains("config"));
    }

    #[test]
    fn test_credential_is_trimmed() {
        let cred = ApiCredential::new("  key-123\n", CredentialSource::Config, "Test");
        assert_eq!(cred.expose(), "key-123");
    }

    #[test]
    fn test_blank_optional_is_absent() {
        assert!(ApiCredential::from_optional(Some("   "), CredentialSource::Config, "T").is_none());
        assert!(ApiCredential::from_optional(None, CredentialSource::Config, "T").is_none());
        assert!(ApiCredential::from_optional(Some("k"), CredentialSource::Config, "T").is_some());
    }

    #[test]
    fn test_from_env_uses_first_available_variable() {
        std::env::set_var("LEICLARA_TEST_KEY_SECOND", "env-key");
        let cred = ApiCredential::from_env(
            &["LEICLARA_TEST_KEY_FIRST_UNSET", "LEICLARA_TEST_KEY_SECOND"],
            "Test key",
        )
        .unwrap();

        assert_eq!(cred.expose(), "env-key");
        assert_eq!(cred.source(), CredentialSource::Environment);
        std::env::remove_var("LEICLARA_TEST_KEY_SECOND");
    }

    #[test]
    fn test_from_env_error_when_missing() {
        let err = ApiCredential::from_env(&["LEICLARA_NONEXISTENT_VAR_12345"], "Test key")
            .unwrap_err();
        assert!(err.to_string().contains("Test key"));
        assert!(err.to_string().contains("LEICLARA_NONEXISTENT_VAR_12345"));
    }
}
