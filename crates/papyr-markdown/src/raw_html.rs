//! Raw HTML allowlist filtering.
//!
//! Markdown content may carry raw HTML. Only a fixed set of inline formatting
//! tags survives conversion; everything else is entity-escaped. Allowed tags
//! are re-emitted bare (no attributes), so event handlers and inline styles
//! never reach the output.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::escape_html;

/// Inline tags that pass through markdown conversion unescaped.
pub const ALLOWED_TAGS: &[&str] = &[
    "br", "b", "i", "em", "strong", "s", "u", "small", "sub", "sup", "kbd", "mark", "ruby", "rt",
    "rp",
];

/// Matches an opening, closing, or self-closing allowed tag. The attribute
/// section tolerates quoted values containing `<` and `>`.
static ALLOWED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    let names = ALLOWED_TAGS.join("|");
    Regex::new(&format!(
        r#"(?i)<(/?)({names})(?:\s(?:"[^"]*"|'[^']*'|[^<>"'])*)?/?>"#
    ))
    .unwrap()
});

/// Filter a raw HTML event from the markdown parser.
///
/// Escape-by-default: only allowlisted tags are recognized, and they are
/// re-emitted without attributes, keeping closing tags closing
/// (`<br class="x">` becomes `<br>`, `</b>` stays `</b>`). Every run of input
/// outside a recognized tag is entity-escaped, so disallowed tags, comments,
/// declarations, and anything the tag pattern does not match can never reach
/// the output raw.
#[must_use]
pub fn filter_raw_html(html: &str) -> Cow<'_, str> {
    let mut out = String::new();
    let mut last = 0;
    for caps in ALLOWED_TAG_RE.captures_iter(html) {
        let (Some(whole), Some(slash), Some(name)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        out.push_str(&escape_html(&html[last..whole.start()]));
        write!(
            out,
            "<{}{}>",
            slash.as_str(),
            name.as_str().to_ascii_lowercase()
        )
        .unwrap();
        last = whole.end();
    }
    if last == 0 {
        return escape_html(html);
    }
    out.push_str(&escape_html(&html[last..]));
    Cow::Owned(out)
}
