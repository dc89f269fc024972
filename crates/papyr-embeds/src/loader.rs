//! Idempotent one-time engine loading.

use std::cell::Cell;

use crate::consts::engine_script_url;
use crate::engine::{DiagramEngine, EngineConfig};
use crate::error::EmbedError;

/// Host-page capability for script injection.
pub trait ScriptHost {
    /// Whether a script with this URL is already present in the page.
    fn has_script(&self, url: &str) -> bool;

    /// Insert a script tag for this URL.
    fn insert_script(&self, url: &str) -> Result<(), EmbedError>;
}

/// One-time loader for the diagram engine.
///
/// The host application shares a single loader across every widget on a page,
/// giving page-wide load-once semantics: the first `ensure_loaded` call
/// inserts the pinned CDN script (skipped if the page already has it) and
/// initializes the engine with the fixed options; every later call is a no-op.
///
/// Single-threaded by design — the widget runtime lives on one event loop.
pub struct EngineLoader {
    script_url: String,
    config: EngineConfig,
    loaded: Cell<bool>,
}

impl EngineLoader {
    /// Create a loader with the pinned CDN script URL.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            script_url: engine_script_url(),
            config,
            loaded: Cell::new(false),
        }
    }

    /// Override the script URL (e.g. a self-hosted mirror).
    #[must_use]
    pub fn with_script_url(mut self, url: impl Into<String>) -> Self {
        self.script_url = url.into();
        self
    }

    /// Whether the engine has been loaded and initialized.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Load the engine script and initialize the engine, exactly once.
    ///
    /// Idempotent: returns immediately when already loaded. The script insert
    /// is skipped when the page already carries it, but initialization still
    /// runs so the engine picks up this loader's options.
    pub fn ensure_loaded(
        &self,
        host: &dyn ScriptHost,
        engine: &dyn DiagramEngine,
    ) -> Result<(), EmbedError> {
        if self.loaded.get() {
            return Ok(());
        }

        if !host.has_script(&self.script_url) {
            host.insert_script(&self.script_url)?;
        }
        engine.initialize(&self.config);
        self.loaded.set(true);
        tracing::debug!(url = %self.script_url, "diagram engine initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockEngine, MockScriptHost};

    #[test]
    fn test_loads_and_initializes_once() {
        let loader = EngineLoader::new(EngineConfig::default());
        let host = MockScriptHost::new();
        let engine = MockEngine::new();

        loader.ensure_loaded(&host, &engine).unwrap();
        loader.ensure_loaded(&host, &engine).unwrap();
        loader.ensure_loaded(&host, &engine).unwrap();

        assert_eq!(host.inserted().len(), 1);
        assert_eq!(engine.init_count(), 1);
        assert!(loader.is_loaded());
    }

    #[test]
    fn test_skips_insert_when_script_present() {
        let loader = EngineLoader::new(EngineConfig::default());
        let host = MockScriptHost::new().with_script(engine_script_url());
        let engine = MockEngine::new();

        loader.ensure_loaded(&host, &engine).unwrap();

        assert!(host.inserted().is_empty());
        assert_eq!(engine.init_count(), 1);
    }

    #[test]
    fn test_insert_failure_propagates_and_stays_unloaded() {
        let loader = EngineLoader::new(EngineConfig::default());
        let host = MockScriptHost::new().failing();
        let engine = MockEngine::new();

        let err = loader.ensure_loaded(&host, &engine).unwrap_err();
        assert!(matches!(err, EmbedError::ScriptLoad { .. }));
        assert!(!loader.is_loaded());
        assert_eq!(engine.init_count(), 0);
    }

    #[test]
    fn test_custom_script_url() {
        let loader = EngineLoader::new(EngineConfig::default())
            .with_script_url("https://assets.example.com/mermaid.min.js");
        let host = MockScriptHost::new();
        let engine = MockEngine::new();

        loader.ensure_loaded(&host, &engine).unwrap();

        assert_eq!(
            host.inserted(),
            vec!["https://assets.example.com/mermaid.min.js".to_owned()]
        );
    }

    #[test]
    fn test_initialize_receives_config() {
        let loader = EngineLoader::new(EngineConfig::with_theme(crate::engine::Theme::Dark));
        let host = MockScriptHost::new();
        let engine = MockEngine::new();

        loader.ensure_loaded(&host, &engine).unwrap();

        let config = engine.last_config().unwrap();
        assert_eq!(config.theme, crate::engine::Theme::Dark);
        assert!(!config.html_labels);
    }
}
