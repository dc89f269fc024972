//! The diagram embed widget.

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::consts::VISIBILITY_MARGIN_PX;
use crate::engine::DiagramEngine;
use crate::error::EmbedError;
use crate::host::EmbedHost;
use crate::loader::{EngineLoader, ScriptHost};
use crate::risk::{EmbedLimits, Locale, PotentialRisk};
use crate::visibility::{Registration, VisibilityObserver};

/// Placeholder fragment inserted on attachment, before any rendering.
const PLACEHOLDER_HTML: &str = r#"<div class="diagram-embed-placeholder"></div>"#;

/// Result of one render pass. Variants are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The source was empty; nothing was done.
    Skipped,
    /// A risk check failed; the error list fragment was inserted.
    Rejected(PotentialRisk),
    /// The diagram was rendered and inserted under the given element id.
    Rendered {
        /// Unique id scoping the generated markup.
        element_id: String,
    },
}

/// A deferred diagram embed.
///
/// On [`attach`](Self::attach) the widget inserts a placeholder and registers
/// a visibility callback with a lookahead margin; the expensive render runs at
/// most once per attachment, when the host signals near-visibility.
/// [`detach`](Self::detach) cancels a pending render.
///
/// [`render`](Self::render) stays callable by the host after the visibility
/// trigger — each call re-validates and re-renders. The at-most-once guarantee
/// applies only to the visibility path.
pub struct DiagramEmbed {
    host: Rc<dyn EmbedHost>,
    engine: Rc<dyn DiagramEngine>,
    script_host: Rc<dyn ScriptHost>,
    loader: Rc<EngineLoader>,
    limits: EmbedLimits,
    locale: Locale,
    registration: RefCell<Option<Registration>>,
}

impl DiagramEmbed {
    /// Create a widget over the given capabilities.
    ///
    /// The loader is shared across every widget on a page so the engine is
    /// initialized once per page.
    #[must_use]
    pub fn new(
        host: Rc<dyn EmbedHost>,
        engine: Rc<dyn DiagramEngine>,
        script_host: Rc<dyn ScriptHost>,
        loader: Rc<EngineLoader>,
    ) -> Self {
        Self {
            host,
            engine,
            script_host,
            loader,
            limits: EmbedLimits::default(),
            locale: Locale::default(),
            registration: RefCell::new(None),
        }
    }

    /// Override the heuristic limits.
    #[must_use]
    pub fn limits(mut self, limits: EmbedLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the error message locale.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Attach to the document: insert the placeholder and register for
    /// visibility with the fixed lookahead margin.
    ///
    /// Re-attaching replaces (and thereby cancels) any previous registration.
    pub fn attach(self: &Rc<Self>, observer: &VisibilityObserver) {
        self.host.append_html(PLACEHOLDER_HTML);

        let widget = Rc::downgrade(self);
        let registration = observer.observe(VISIBILITY_MARGIN_PX, move || {
            if let Some(widget) = widget.upgrade() {
                // The registration is spent once the callback runs.
                widget.registration.borrow_mut().take();
                if let Err(e) = widget.render() {
                    tracing::warn!(error = %e, "deferred diagram render failed");
                }
            }
        });
        *self.registration.borrow_mut() = Some(registration);
    }

    /// Detach from the document, cancelling a pending render.
    ///
    /// A render already in progress is not interrupted.
    pub fn detach(&self) {
        self.registration.borrow_mut().take();
    }

    /// Visibility registration id, while attached and untriggered.
    #[must_use]
    pub fn registration_id(&self) -> Option<u64> {
        self.registration.borrow().as_ref().map(Registration::id)
    }

    /// Validate the source and render the diagram.
    ///
    /// Ensures the engine is loaded (idempotent), then runs the risk checks.
    /// Empty source exits silently; any raised risk flag replaces the widget
    /// content with the localized error list; otherwise the rendered markup is
    /// appended as a child and the original source is hidden, not removed.
    ///
    /// Engine failures never propagate — they degrade to the syntax error
    /// fragment. Only a script load failure is returned as an error.
    pub fn render(&self) -> Result<RenderOutcome, EmbedError> {
        self.loader
            .ensure_loaded(self.script_host.as_ref(), self.engine.as_ref())?;

        let source = self.host.source_text();
        if source.trim().is_empty() {
            return Ok(RenderOutcome::Skipped);
        }

        let risk = PotentialRisk::assess(&source, self.engine.as_ref(), &self.limits);
        if risk.any() {
            self.reject(risk);
            return Ok(RenderOutcome::Rejected(risk));
        }

        let element_id = format!("diagram-embed-{}", Uuid::new_v4());
        match self.engine.render(&element_id, &source) {
            Ok(markup) => {
                self.host.hide_source();
                self.host.append_html(&markup);
                Ok(RenderOutcome::Rendered { element_id })
            }
            Err(e) => {
                tracing::warn!(error = %e, element_id = %element_id, "diagram rendering failed");
                let risk = PotentialRisk::syntax_only();
                self.reject(risk);
                Ok(RenderOutcome::Rejected(risk))
            }
        }
    }

    fn reject(&self, risk: PotentialRisk) {
        let html = risk.error_list_html(self.locale, &self.limits);
        self.host.set_html(&html);
    }
}
