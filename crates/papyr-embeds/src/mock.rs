//! Mock capabilities for testing.
//!
//! In-memory implementations of [`EmbedHost`], [`DiagramEngine`], and
//! [`ScriptHost`] that record every call. Available under the `mock` feature
//! for downstream crates and always in this crate's own tests.

use std::cell::{Cell, RefCell};

use crate::engine::{DiagramEngine, EngineConfig};
use crate::error::{EmbedError, RenderError, SyntaxError};
use crate::host::EmbedHost;
use crate::loader::ScriptHost;

/// Mock host element recording content mutations.
#[derive(Debug, Default)]
pub struct MockEmbedHost {
    source: String,
    set_calls: RefCell<Vec<String>>,
    appended: RefCell<Vec<String>>,
    source_hidden: Cell<bool>,
}

impl MockEmbedHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element's text content.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Fragments passed to `set_html`, in call order.
    #[must_use]
    pub fn set_calls(&self) -> Vec<String> {
        self.set_calls.borrow().clone()
    }

    /// Fragments passed to `append_html`, in call order.
    #[must_use]
    pub fn appended(&self) -> Vec<String> {
        self.appended.borrow().clone()
    }

    /// Whether `hide_source` was called.
    #[must_use]
    pub fn source_hidden(&self) -> bool {
        self.source_hidden.get()
    }
}

impl EmbedHost for MockEmbedHost {
    fn source_text(&self) -> String {
        self.source.clone()
    }

    fn set_html(&self, html: &str) {
        self.set_calls.borrow_mut().push(html.to_owned());
    }

    fn append_html(&self, html: &str) {
        self.appended.borrow_mut().push(html.to_owned());
    }

    fn hide_source(&self) {
        self.source_hidden.set(true);
    }
}

/// Mock diagram engine with configurable parse and render outcomes.
#[derive(Debug, Default)]
pub struct MockEngine {
    parse_error: Option<SyntaxError>,
    render_error: Option<RenderError>,
    init_count: Cell<usize>,
    last_config: RefCell<Option<EngineConfig>>,
    rendered_ids: RefCell<Vec<String>>,
}

impl MockEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `parse` fail with the given error.
    #[must_use]
    pub fn with_parse_error(mut self, error: SyntaxError) -> Self {
        self.parse_error = Some(error);
        self
    }

    /// Make `render` fail with the given error.
    #[must_use]
    pub fn with_render_error(mut self, error: RenderError) -> Self {
        self.render_error = Some(error);
        self
    }

    /// Number of `initialize` calls.
    #[must_use]
    pub fn init_count(&self) -> usize {
        self.init_count.get()
    }

    /// Options passed to the most recent `initialize` call.
    #[must_use]
    pub fn last_config(&self) -> Option<EngineConfig> {
        self.last_config.borrow().clone()
    }

    /// Element ids passed to `render`, in call order.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<String> {
        self.rendered_ids.borrow().clone()
    }
}

impl DiagramEngine for MockEngine {
    fn initialize(&self, config: &EngineConfig) {
        self.init_count.set(self.init_count.get() + 1);
        *self.last_config.borrow_mut() = Some(config.clone());
    }

    fn parse(&self, _source: &str) -> Result<(), SyntaxError> {
        match &self.parse_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn render(&self, element_id: &str, source: &str) -> Result<String, RenderError> {
        if let Some(e) = &self.render_error {
            return Err(e.clone());
        }
        self.rendered_ids.borrow_mut().push(element_id.to_owned());
        Ok(format!(
            r#"<svg id="{element_id}" role="img"><!-- {} bytes --></svg>"#,
            source.len()
        ))
    }
}

/// Mock script host recording inserted script URLs.
#[derive(Debug, Default)]
pub struct MockScriptHost {
    present: RefCell<Vec<String>>,
    inserted: RefCell<Vec<String>>,
    fail_insert: bool,
}

impl MockScriptHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a script URL as already present in the page.
    #[must_use]
    pub fn with_script(self, url: impl Into<String>) -> Self {
        self.present.borrow_mut().push(url.into());
        self
    }

    /// Make `insert_script` fail.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_insert = true;
        self
    }

    /// URLs passed to `insert_script`, in call order.
    #[must_use]
    pub fn inserted(&self) -> Vec<String> {
        self.inserted.borrow().clone()
    }
}

impl ScriptHost for MockScriptHost {
    fn has_script(&self, url: &str) -> bool {
        self.present.borrow().iter().any(|u| u == url)
            || self.inserted.borrow().iter().any(|u| u == url)
    }

    fn insert_script(&self, url: &str) -> Result<(), EmbedError> {
        if self.fail_insert {
            return Err(EmbedError::ScriptLoad {
                url: url.to_owned(),
                reason: "network unavailable".to_owned(),
            });
        }
        self.inserted.borrow_mut().push(url.to_owned());
        Ok(())
    }
}
