//! Runtime configuration and user settings.
//!
//! [`RuntimeConfig`] holds the fixed service parameters (endpoint, model
//! candidates, deadline). [`Settings`] is the user-editable key-value surface:
//! API key, preferred model and theme, layered from a YAML file, a `.env`
//! file and the process environment.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::providers::{ApiCredential, CredentialSource};

/// Default API base for the generative-language service.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Preferred model when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Fixed fallbacks tried after the preferred model, in order.
pub const FALLBACK_MODELS: [&str; 3] = ["gemini-3-pro-preview", "gemini-1.5-pro-latest", "gemini-pro"];

/// Budget for one remote call, shared by every candidate attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
}

/// Service parameters for the remote adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// API base URL
    pub api_base: String,

    /// Model tried first when no model has succeeded yet
    pub default_model: String,

    /// Models tried after the preferred one
    pub fallback_models: Vec<String>,

    /// Deadline for a whole call, e.g. `"30s"`
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            fallback_models: FALLBACK_MODELS.iter().map(|m| m.to_string()).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RuntimeConfig {
    /// Parse from YAML; missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Set a custom deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a human-readable duration such as `"30s"` or `"1m 30s"`.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

mod humantime_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

/// User settings: the key-value store consulted before each request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Credential for the remote service; absent means local-only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Preferred model identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// UI theme (`dark` or empty)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

/// Keys read from `.env` files and the environment, in precedence order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
const MODEL_VAR: &str = "GEMINI_MODEL";

impl Settings {
    /// Parse settings from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Settings carried by the text of a `.env` file.
    pub fn from_env_text(text: &str) -> Self {
        Self::from_lookup(|key| parse_env(text).get(key).cloned())
    }

    /// Load a `.env` file.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(Self::from_env_text(&contents))
    }

    /// Settings carried by the process environment.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: API_KEY_VARS.iter().find_map(|key| non_blank(key)),
            model: non_blank(MODEL_VAR),
            theme: None,
        }
    }

    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            api_key: other.api_key.or(self.api_key),
            model: other.model.or(self.model),
            theme: other.theme.or(self.theme),
        }
    }

    /// Credential, if a non-blank key is configured.
    pub fn credential(&self) -> Option<ApiCredential> {
        ApiCredential::from_optional(
            self.api_key.as_deref(),
            CredentialSource::Config,
            "Gemini API key",
        )
    }

    /// Configured model, or [`DEFAULT_MODEL`].
    pub fn model_or_default(&self) -> &str {
        self.model
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }
}

/// Parse `KEY=value` lines.
///
/// Blank lines and `#` comments are skipped, lines without `=` (or with an
/// empty key) are ignored, and one pair of surrounding quotes is stripped
/// from values.
pub fn parse_env(text: &str) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        env.insert(key.to_string(), unquote(value.trim()).to_string());
    }

    env
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| {
            value
                .strip_prefix(*quote)
                .and_then(|inner| inner.strip_suffix(*quote))
        })
        .unwrap_or(value)
}
