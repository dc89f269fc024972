//! Embed configuration.
//!
//! Parses an `[embeds]`-style TOML section with serde. All fields are
//! optional and default to the built-in limits, theme, and locale.

use serde::Deserialize;

use crate::consts::{self, MAX_CHAIN_LINKS, MAX_SOURCE_CHARS};
use crate::engine::{EngineConfig, Theme};
use crate::risk::{EmbedLimits, Locale};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Diagram embed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Maximum diagram source length in characters.
    pub max_source_chars: usize,
    /// Maximum number of chained links in a diagram.
    pub max_chain_links: usize,
    /// Engine color theme.
    pub theme: Theme,
    /// Locale for rendered error messages.
    pub locale: Locale,
    /// Override for the engine script URL (defaults to the pinned CDN build).
    pub script_url: Option<String>,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            max_source_chars: MAX_SOURCE_CHARS,
            max_chain_links: MAX_CHAIN_LINKS,
            theme: Theme::default(),
            locale: Locale::default(),
            script_url: None,
        }
    }
}

impl EmbedConfig {
    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML and
    /// `ConfigError::Validation` when a field has an invalid value.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_source_chars == 0 {
            return Err(ConfigError::Validation(
                "max_source_chars must be greater than zero".to_owned(),
            ));
        }
        if let Some(url) = &self.script_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "script_url must start with http:// or https:// (got: {url})"
                )));
            }
        }
        Ok(())
    }

    /// Risk-check limits derived from this configuration.
    #[must_use]
    pub fn limits(&self) -> EmbedLimits {
        EmbedLimits {
            max_source_chars: self.max_source_chars,
            max_chain_links: self.max_chain_links,
            ..EmbedLimits::default()
        }
    }

    /// Engine options derived from this configuration.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_theme(self.theme)
    }

    /// Script URL to load, configured or default.
    #[must_use]
    pub fn script_url(&self) -> String {
        self.script_url
            .clone()
            .unwrap_or_else(consts::engine_script_url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbedConfig::default();
        assert_eq!(config.max_source_chars, 2000);
        assert_eq!(config.max_chain_links, 10);
        assert_eq!(config.theme, Theme::Neutral);
        assert_eq!(config.locale, Locale::En);
        assert!(config.script_url.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = EmbedConfig::from_toml_str("").unwrap();
        assert_eq!(config, EmbedConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
max_source_chars = 500
locale = "ja"
"#;
        let config = EmbedConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_source_chars, 500);
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.max_chain_links, 10);
    }

    #[test]
    fn test_parse_theme() {
        let config = EmbedConfig::from_toml_str(r#"theme = "dark""#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.engine_config().theme, Theme::Dark);
    }

    #[test]
    fn test_parse_error_on_malformed_toml() {
        let err = EmbedConfig::from_toml_str("max_source_chars = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_char_limit_rejected() {
        let err = EmbedConfig::from_toml_str("max_source_chars = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_script_url_must_be_http() {
        let err = EmbedConfig::from_toml_str(r#"script_url = "ftp://x/mermaid.js""#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_script_url_default_and_override() {
        let config = EmbedConfig::default();
        assert!(config.script_url().contains("mermaid"));

        let config =
            EmbedConfig::from_toml_str(r#"script_url = "https://example.com/mermaid.min.js""#)
                .unwrap();
        assert_eq!(config.script_url(), "https://example.com/mermaid.min.js");
    }

    #[test]
    fn test_limits_derived() {
        let config = EmbedConfig::from_toml_str("max_chain_links = 3").unwrap();
        let limits = config.limits();
        assert_eq!(limits.max_chain_links, 3);
        assert_eq!(limits.chain_delimiter, '&');
    }
}
