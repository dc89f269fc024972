//! Embed error types.

/// Error returned by widget operations.
///
/// Validation failures (syntax errors, oversized input) are not errors —
/// they become a rendered error fragment. Only failures that leave the widget
/// unable to do anything at all are propagated.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// The engine script could not be loaded into the host page.
    #[error("failed to load engine script from {url}: {reason}")]
    ScriptLoad { url: String, reason: String },
}

/// Syntax error reported by the diagram engine's parser.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// Human-readable message from the engine.
    pub message: String,
    /// Source line the engine attributed the error to, when known.
    pub line: Option<usize>,
}

impl SyntaxError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }
}

/// Failure reported by the diagram engine's renderer.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    /// Human-readable message from the engine.
    pub message: String,
}

impl RenderError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
