//! Markdown to HTML conversion.

use std::fmt::Write;

use pulldown_cmark::{
    Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::escape::escape_html;
use crate::raw_html::filter_raw_html;

/// Convert markdown text to HTML with the default configuration.
///
/// Tables, strikethrough, task lists, and line-break conversion are enabled.
/// Conversion never fails; malformed markdown degrades per the parser's own
/// tolerance.
#[must_use]
pub fn to_html(markdown: &str) -> String {
    Converter::new().convert(markdown)
}

/// Markdown to HTML converter.
///
/// # Example
///
/// ```
/// use papyr_markdown::Converter;
///
/// let html = Converter::new().convert("| a |\n|---|\n| b |");
/// assert!(html.contains("<table>"));
/// ```
#[derive(Debug, Clone)]
pub struct Converter {
    gfm: bool,
    breaks: bool,
}

impl Converter {
    /// Create a converter with tables and line-break conversion enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            breaks: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features
    /// (tables, strikethrough, task lists).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable soft-break to `<br>` conversion.
    #[must_use]
    pub fn with_breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Parser options for the current configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Convert markdown text to an HTML string.
    #[must_use]
    pub fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.parser_options());
        let mut writer = HtmlWriter::new(self.breaks);
        for event in parser {
            writer.process_event(event);
        }
        writer.finish()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Fenced/indented code block collection state.
#[derive(Default)]
struct CodeBlockState {
    active: bool,
    lang: Option<String>,
    buf: String,
}

impl CodeBlockState {
    fn start(&mut self, lang: Option<String>) {
        self.active = true;
        self.lang = lang;
        self.buf.clear();
    }

    fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.lang.take(), std::mem::take(&mut self.buf))
    }
}

/// Table rendering state: column alignments and head/body position.
#[derive(Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell: usize,
}

impl TableState {
    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            _ => "",
        }
    }
}

/// Event-driven HTML writer.
///
/// Code block and code span content is always entity-escaped; raw HTML events
/// go through the allowlist filter; everything else follows the usual
/// markdown-to-HTML mapping.
struct HtmlWriter {
    out: String,
    breaks: bool,
    code: CodeBlockState,
    table: TableState,
    image_alt: Option<String>,
    pending_image: Option<(String, String)>,
}

impl HtmlWriter {
    fn new(breaks: bool) -> Self {
        Self {
            out: String::with_capacity(1024),
            breaks,
            code: CodeBlockState::default(),
            table: TableState::default(),
            image_alt: None,
            pending_image: None,
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => {
                if let Some(alt) = self.image_alt.as_mut() {
                    alt.push(' ');
                } else {
                    self.out.push_str("<br>");
                }
            }
            Event::Rule => self.push_inline("<hr>"),
            Event::TaskListMarker(checked) => {
                self.out.push_str(if checked {
                    r#"<input type="checkbox" checked disabled>"#
                } else {
                    r#"<input type="checkbox" disabled>"#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    /// Push inline markup unless alt text is being collected.
    fn push_inline(&mut self, content: &str) {
        if self.image_alt.is_none() {
            self.out.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.out.push_str("<p>"),
            Tag::Heading { level, .. } => {
                write!(self.out, "<h{}>", heading_level_to_num(level)).unwrap();
            }
            Tag::BlockQuote(_) => self.out.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) if !info.is_empty() => info
                        .split_whitespace()
                        .next()
                        .map(std::borrow::ToOwned::to_owned),
                    _ => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.out.push_str("<ol>"),
                Some(n) => write!(self.out, r#"<ol start="{n}">"#).unwrap(),
                None => self.out.push_str("<ul>"),
            },
            Tag::Item => self.out.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.alignments = alignments;
                self.out.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell = 0;
                self.out.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell = 0;
                self.out.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.alignment_style();
                let tag = if self.table.in_head { "th" } else { "td" };
                write!(self.out, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<s>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link { dest_url, .. } => {
                let link = format!(r#"<a href="{}">"#, escape_html(&dest_url));
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image_alt = Some(String::new());
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::DefinitionList => self.out.push_str("<dl>"),
            Tag::DefinitionListTitle => self.out.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.out.push_str("<dd>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.out.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.out, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.out.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                if let Some(lang) = lang {
                    write!(
                        self.out,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(&lang),
                        escape_html(&content)
                    )
                    .unwrap();
                } else {
                    write!(self.out, "<pre><code>{}</code></pre>", escape_html(&content))
                        .unwrap();
                }
            }
            TagEnd::List(ordered) => {
                self.out.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.out.push_str("</li>"),
            TagEnd::Table => self.out.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.out.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.out.push_str("</tr>"),
            TagEnd::TableCell => {
                self.out
                    .push_str(if self.table.in_head { "</th>" } else { "</td>" });
                self.table.cell += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</s>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image_alt.take().unwrap_or_default();
                if let Some((src, title)) = self.pending_image.take() {
                    if title.is_empty() {
                        write!(
                            self.out,
                            r#"<img src="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&alt)
                        )
                        .unwrap();
                    } else {
                        write!(
                            self.out,
                            r#"<img src="{}" title="{}" alt="{}">"#,
                            escape_html(&src),
                            escape_html(&title),
                            escape_html(&alt)
                        )
                        .unwrap();
                    }
                }
            }
            TagEnd::DefinitionList => self.out.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.out.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.out.push_str("</dd>"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.active {
            self.code.buf.push_str(text);
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else {
            self.out.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(code);
        } else {
            write!(self.out, "<code>{}</code>", escape_html(code)).unwrap();
        }
    }

    fn raw_html(&mut self, html: &str) {
        if self.image_alt.is_some() {
            return;
        }
        self.out.push_str(&filter_raw_html(html));
    }

    fn soft_break(&mut self) {
        if self.code.active {
            self.code.buf.push('\n');
        } else if let Some(alt) = self.image_alt.as_mut() {
            alt.push(' ');
        } else if self.breaks {
            self.out.push_str("<br>");
        } else {
            self.out.push('\n');
        }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(to_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_raw_br_in_prose_preserved() {
        assert_eq!(to_html("foo<br>bar"), "<p>foo<br>bar</p>");
    }

    #[test]
    fn test_raw_br_in_table_cell_preserved() {
        let html = to_html("| col |\n| --- |\n| foo<br>bar |");
        assert!(html.contains("foo<br>bar"), "got: {html}");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_br_in_code_span_escaped() {
        assert_eq!(
            to_html("foo`<br>`bar"),
            "<p>foo<code>&lt;br&gt;</code>bar</p>"
        );
    }

    #[test]
    fn test_br_in_fenced_block_escaped() {
        let html = to_html("```\nfoo<br>bar\n```");
        assert!(html.contains("&lt;br&gt;"), "got: {html}");
        assert!(!html.contains("foo<br>bar"));
    }

    #[test]
    fn test_disallowed_raw_html_escaped() {
        let html = to_html("foo<script>alert(1)</script>bar");
        assert!(html.contains("&lt;script&gt;"), "got: {html}");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_allowed_tag_attributes_stripped() {
        let html = to_html(r#"foo<b onclick="evil()">bar</b>"#);
        assert_eq!(html, "<p>foo<b>bar</b></p>");
    }

    #[test]
    fn test_disallowed_tag_with_angle_bracket_in_attribute_escaped() {
        // Valid inline HTML per the parser, so it arrives as one raw event;
        // the quoted `<` must not let the tag through.
        let html = to_html(r#"x<img alt="a<b" src=x onerror=alert(1)>y"#);
        assert!(!html.contains("<img"), "got: {html}");
        assert!(html.contains("&lt;img"), "got: {html}");
    }

    #[test]
    fn test_soft_break_converted() {
        assert_eq!(to_html("foo\nbar"), "<p>foo<br>bar</p>");
    }

    #[test]
    fn test_soft_break_not_converted_without_breaks() {
        let html = Converter::new().with_breaks(false).convert("foo\nbar");
        assert_eq!(html, "<p>foo\nbar</p>");
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(to_html("foo  \nbar"), "<p>foo<br>bar</p>");
    }

    #[test]
    fn test_code_block_with_language() {
        let html = to_html("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_code_block_without_language() {
        let html = to_html("```\nplain\n```");
        assert!(html.contains("<pre><code>plain"));
    }

    #[test]
    fn test_heading() {
        assert_eq!(to_html("## Section"), "<h2>Section</h2>");
    }

    #[test]
    fn test_table_structure() {
        let html = to_html("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table><thead><tr><th>A</th><th>B</th></tr></thead>"));
        assert!(html.contains("<tbody><tr><td>1</td><td>2</td></tr></tbody></table>"));
    }

    #[test]
    fn test_table_alignment() {
        let html = to_html("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert!(html.contains(r#"<th style="text-align: left">A</th>"#));
        assert!(html.contains(r#"<th style="text-align: right">B</th>"#));
        assert!(html.contains(r#"<td style="text-align: left">1</td>"#));
    }

    #[test]
    fn test_tables_disabled_without_gfm() {
        let html = Converter::new()
            .with_gfm(false)
            .convert("| A |\n|---|\n| 1 |");
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_emphasis_and_strong() {
        assert_eq!(
            to_html("*italic* and **bold**"),
            "<p><em>italic</em> and <strong>bold</strong></p>"
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(to_html("~~gone~~"), "<p><s>gone</s></p>");
    }

    #[test]
    fn test_link_href_escaped() {
        let html = to_html(r#"[x](https://example.com/?a=1&b=2)"#);
        assert_eq!(
            html,
            r#"<p><a href="https://example.com/?a=1&amp;b=2">x</a></p>"#
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            to_html("![Alt text](image.png)"),
            r#"<p><img src="image.png" alt="Alt text"></p>"#
        );
    }

    #[test]
    fn test_image_with_title() {
        assert_eq!(
            to_html(r#"![Alt](image.png "Title")"#),
            r#"<p><img src="image.png" title="Title" alt="Alt"></p>"#
        );
    }

    #[test]
    fn test_image_alt_spanning_lines() {
        assert_eq!(
            to_html("![a\nb](x.png)"),
            r#"<p><img src="x.png" alt="a b"></p>"#
        );
        assert_eq!(
            to_html("![a  \nb](x.png)"),
            r#"<p><img src="x.png" alt="a b"></p>"#
        );
    }

    #[test]
    fn test_lists() {
        assert_eq!(
            to_html("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
        assert_eq!(
            to_html("1. first\n2. second"),
            "<ol><li>first</li><li>second</li></ol>"
        );
    }

    #[test]
    fn test_ordered_list_start() {
        let html = to_html("3. third\n4. fourth");
        assert!(html.contains(r#"<ol start="3">"#));
    }

    #[test]
    fn test_task_list() {
        let html = to_html("- [ ] open\n- [x] done");
        assert!(html.contains(r#"<input type="checkbox" disabled>"#));
        assert!(html.contains(r#"<input type="checkbox" checked disabled>"#));
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(to_html("> quoted"), "<blockquote><p>quoted</p></blockquote>");
    }

    #[test]
    fn test_rule() {
        assert_eq!(to_html("---"), "<hr>");
    }

    #[test]
    fn test_text_entities_escaped() {
        assert_eq!(to_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_html_block_filtered() {
        let html = to_html("<div>\nblock\n</div>");
        assert!(html.contains("&lt;div&gt;"), "got: {html}");
    }

    #[test]
    fn test_default_converter_matches_new() {
        assert_eq!(
            Converter::default().convert("x"),
            Converter::new().convert("x")
        );
    }
}
