//! Markdown to HTML conversion for the publishing pipeline.
//!
//! This crate provides a pure markdown-to-HTML converter built on
//! `pulldown-cmark` with a strict contract around raw HTML:
//!
//! - Allowlisted inline tags (`<br>`, `<b>`, `<ruby>`, ...) found in prose or
//!   table cells pass through unescaped.
//! - The same tags inside inline code spans or fenced code blocks are always
//!   entity-escaped (code content is literal text).
//! - Raw HTML outside the allowlist is entity-escaped wherever it appears.
//!
//! # Example
//!
//! ```
//! use papyr_markdown::to_html;
//!
//! assert_eq!(to_html("foo<br>bar"), "<p>foo<br>bar</p>");
//! assert_eq!(to_html("`<br>`"), "<p><code>&lt;br&gt;</code></p>");
//! ```

mod escape;
mod raw_html;
mod renderer;

pub use escape::escape_html;
pub use raw_html::{ALLOWED_TAGS, filter_raw_html};
pub use renderer::{Converter, to_html};
