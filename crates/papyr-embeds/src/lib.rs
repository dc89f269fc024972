//! Deferred diagram embed widget for Papyr pages.
//!
//! Turns an element holding mermaid-style diagram source into a rendered
//! diagram, lazily: rendering is deferred until the element is near-visible,
//! the third-party engine script is loaded once per page, and every render is
//! gated by heuristic risk checks (syntax, source length, link chaining) that
//! degrade to a localized error list instead of failing.
//!
//! # Architecture
//!
//! The widget never touches the page or the engine directly. The host
//! application injects three capabilities:
//!
//! - [`EmbedHost`] — the widget's element (read source, mutate content)
//! - [`ScriptHost`] — script tag lookup and insertion
//! - [`DiagramEngine`] — initialize, parse, and render
//!
//! A shared [`EngineLoader`] gives page-wide load-once semantics and a
//! [`VisibilityObserver`] carries the at-most-once visibility callbacks.
//! Mock capabilities are available behind the `mock` feature flag.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use papyr_embeds::{DiagramEmbed, EngineConfig, EngineLoader, VisibilityObserver};
//!
//! let loader = Rc::new(EngineLoader::new(EngineConfig::default()));
//! let observer = VisibilityObserver::new();
//! let widget = Rc::new(DiagramEmbed::new(host, engine, script_host, loader));
//! widget.attach(&observer);
//! // later, driven by the host page:
//! observer.enter_viewport(widget.registration_id().unwrap());
//! ```

pub mod consts;

mod config;
mod engine;
mod error;
mod host;
mod loader;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod risk;
mod visibility;
mod widget;

pub use config::{ConfigError, EmbedConfig};
pub use engine::{DiagramEngine, EngineConfig, SecurityLevel, Theme};
pub use error::{EmbedError, RenderError, SyntaxError};
pub use host::EmbedHost;
pub use loader::{EngineLoader, ScriptHost};
#[cfg(feature = "mock")]
pub use mock::{MockEmbedHost, MockEngine, MockScriptHost};
pub use risk::{EmbedLimits, Locale, PotentialRisk};
pub use visibility::{Registration, VisibilityObserver};
pub use widget::{DiagramEmbed, RenderOutcome};
