//! Host element capability.

/// The widget's view of its element in the host page.
///
/// The widget never touches the document directly; the host page supplies an
/// implementation backed by whatever element model it uses.
pub trait EmbedHost {
    /// The user-authored diagram source, read from the element's text content.
    fn source_text(&self) -> String;

    /// Replace the element's content with the given fragment.
    fn set_html(&self, html: &str);

    /// Append a fragment as a child of the element.
    fn append_html(&self, html: &str);

    /// Hide the original source without removing it, so it stays available
    /// to assistive technology and as a fallback.
    fn hide_source(&self);
}
