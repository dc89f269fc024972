//! Heuristic risk checks gating diagram rendering.

use serde::Deserialize;

use crate::consts::{CHAIN_DELIMITER, MAX_CHAIN_LINKS, MAX_SOURCE_CHARS};
use crate::engine::DiagramEngine;

/// Locale for the rendered error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

/// Limits applied to diagram source before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedLimits {
    /// Maximum source length in characters.
    pub max_source_chars: usize,
    /// Maximum number of chain-delimiter occurrences.
    pub max_chain_links: usize,
    /// Character that chains links together in the diagram syntax.
    pub chain_delimiter: char,
}

impl Default for EmbedLimits {
    fn default() -> Self {
        Self {
            max_source_chars: MAX_SOURCE_CHARS,
            max_chain_links: MAX_CHAIN_LINKS,
            chain_delimiter: CHAIN_DELIMITER,
        }
    }
}

/// Outcome of the per-render risk checks.
///
/// Computed fresh for every render; any raised flag blocks rendering and maps
/// to one fixed localized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PotentialRisk {
    /// The engine's parser rejected the source.
    pub syntax_error: bool,
    /// Source exceeds the character limit.
    pub char_limit_over: bool,
    /// Source chains more links than allowed.
    pub chaining_of_links_over: bool,
}

impl PotentialRisk {
    /// Run all checks against the source.
    ///
    /// Parse failures from the engine are caught and logged, never propagated:
    /// they surface only as the `syntax_error` flag.
    #[must_use]
    pub fn assess(source: &str, engine: &dyn DiagramEngine, limits: &EmbedLimits) -> Self {
        let syntax_error = match engine.parse(source) {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!(error = %e, line = ?e.line, "diagram syntax validation failed");
                true
            }
        };

        Self {
            syntax_error,
            char_limit_over: source.chars().count() > limits.max_source_chars,
            chaining_of_links_over: source.matches(limits.chain_delimiter).count()
                > limits.max_chain_links,
        }
    }

    /// A risk set with only the syntax flag raised.
    #[must_use]
    pub fn syntax_only() -> Self {
        Self {
            syntax_error: true,
            ..Self::default()
        }
    }

    /// Whether any flag is raised.
    #[must_use]
    pub fn any(&self) -> bool {
        self.syntax_error || self.char_limit_over || self.chaining_of_links_over
    }

    /// One message per raised flag, in fixed order.
    #[must_use]
    pub fn messages(&self, locale: Locale, limits: &EmbedLimits) -> Vec<String> {
        let mut messages = Vec::new();
        if self.syntax_error {
            messages.push(syntax_message(locale));
        }
        if self.char_limit_over {
            messages.push(char_limit_message(locale, limits.max_source_chars));
        }
        if self.chaining_of_links_over {
            messages.push(chain_limit_message(locale, limits.max_chain_links));
        }
        messages
    }

    /// Fixed-structure error fragment: a heading paragraph wrapping a list
    /// with one item per raised flag.
    #[must_use]
    pub fn error_list_html(&self, locale: Locale, limits: &EmbedLimits) -> String {
        let items: String = self
            .messages(locale, limits)
            .iter()
            .map(|m| format!("<li>{m}</li>"))
            .collect();
        format!(
            r#"<div class="diagram-embed-error"><p>{}</p><ul>{items}</ul></div>"#,
            heading_message(locale)
        )
    }
}

fn heading_message(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "The diagram could not be displayed:",
        Locale::Ja => "図を表示できませんでした:",
    }
}

fn syntax_message(locale: Locale) -> String {
    match locale {
        Locale::En => "The diagram source contains a syntax error.".to_owned(),
        Locale::Ja => "シンタックスエラーが含まれています。".to_owned(),
    }
}

fn char_limit_message(locale: Locale, max: usize) -> String {
    match locale {
        Locale::En => format!("The source exceeds the maximum length of {max} characters."),
        Locale::Ja => format!("文字数が上限（{max}文字）を超えています。"),
    }
}

fn chain_limit_message(locale: Locale, max: usize) -> String {
    match locale {
        Locale::En => format!("The diagram chains more than {max} links."),
        Locale::Ja => format!("リンクの連結が上限（{max}個）を超えています。"),
    }
}
