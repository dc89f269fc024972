//! Fixed limits and third-party engine constants.

/// Pinned version of the third-party diagram rendering script.
pub const ENGINE_VERSION: &str = "9.4.3";

/// CDN URL for the pinned engine script.
#[must_use]
pub fn engine_script_url() -> String {
    format!("https://cdn.jsdelivr.net/npm/mermaid@{ENGINE_VERSION}/dist/mermaid.min.js")
}

/// Maximum diagram source length in characters.
pub const MAX_SOURCE_CHARS: usize = 2000;

/// Maximum number of chained links in a single diagram.
pub const MAX_CHAIN_LINKS: usize = 10;

/// Character that chains links together in the diagram syntax.
pub const CHAIN_DELIMITER: char = '&';

/// Lookahead margin in pixels for the visibility observer, so rendering
/// starts before the widget scrolls into view.
pub const VISIBILITY_MARGIN_PX: u32 = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_url_pins_version() {
        let url = engine_script_url();
        assert!(url.contains(ENGINE_VERSION));
        assert!(url.starts_with("https://"));
    }
}
