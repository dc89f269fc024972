//! HTML entity escaping.

use std::borrow::Cow;

/// Escape the five HTML-significant characters (`&`, `<`, `>`, `"`, `'`).
///
/// Returns a borrowed slice when the input contains nothing to escape.
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    let first = text
        .bytes()
        .position(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\''));
    let Some(first) = first else {
        return Cow::Borrowed(text);
    };

    let mut escaped = String::with_capacity(text.len() + 8);
    escaped.push_str(&text[..first]);
    for ch in text[first..].chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_text_borrows() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_tag() {
        assert_eq!(escape_html("<br>"), "&lt;br&gt;");
    }

    #[test]
    fn test_escape_all_significant_chars() {
        assert_eq!(
            escape_html(r#"a & b < c > d " e ' f"#),
            "a &amp; b &lt; c &gt; d &quot; e &#39; f"
        );
    }

    #[test]
    fn test_escape_preserves_prefix() {
        assert_eq!(escape_html("before<after"), "before&lt;after");
    }

    #[test]
    fn test_escape_empty() {
        assert_eq!(escape_html(""), "");
    }
}
