//! Diagram engine capability.
//!
//! The third-party rendering library is injected as an explicit capability
//! rather than reached through a global: [`DiagramEngine`] covers the three
//! operations the widget needs (initialize, parse, render) and
//! [`EngineConfig`] carries the fixed security and presentation options.

use serde::Deserialize;

use crate::error::{RenderError, SyntaxError};

/// Security level passed to the engine.
///
/// The widget always initializes the engine in [`SecurityLevel::Strict`];
/// the loose level exists only so configuration round-trips cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    #[default]
    Strict,
    Loose,
}

impl SecurityLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Loose => "loose",
        }
    }
}

/// Visual theme for rendered diagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Neutral,
    Default,
    Dark,
    Forest,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Forest => "forest",
        }
    }
}

/// Fixed engine initialization options.
///
/// Raw-HTML labels are disabled and the security level is strict; diagrams
/// scale to their container via `use_max_width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Allow raw HTML in diagram labels. Always `false` for embeds.
    pub html_labels: bool,
    /// Engine security level. Always strict for embeds.
    pub security_level: SecurityLevel,
    /// Visual theme.
    pub theme: Theme,
    /// Scale each diagram subtype to the width of its container.
    pub use_max_width: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            html_labels: false,
            security_level: SecurityLevel::Strict,
            theme: Theme::default(),
            use_max_width: true,
        }
    }
}

impl EngineConfig {
    /// Default options with the given theme.
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

/// The three operations the widget needs from the rendering library.
pub trait DiagramEngine {
    /// Apply initialization options. Called once per page by the loader.
    fn initialize(&self, config: &EngineConfig);

    /// Validate diagram source without rendering.
    fn parse(&self, source: &str) -> Result<(), SyntaxError>;

    /// Render diagram source into a markup fragment.
    ///
    /// `element_id` is a unique identifier for this render, used by the
    /// engine to scope the generated markup.
    fn render(&self, element_id: &str, source: &str) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_locked_down() {
        let config = EngineConfig::default();
        assert!(!config.html_labels);
        assert_eq!(config.security_level, SecurityLevel::Strict);
        assert!(config.use_max_width);
    }

    #[test]
    fn test_with_theme_keeps_security() {
        let config = EngineConfig::with_theme(Theme::Dark);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.security_level, SecurityLevel::Strict);
        assert!(!config.html_labels);
    }

    #[test]
    fn test_as_str_values() {
        assert_eq!(SecurityLevel::Strict.as_str(), "strict");
        assert_eq!(Theme::Neutral.as_str(), "neutral");
        assert_eq!(Theme::Forest.as_str(), "forest");
    }
}
