//! Plain-text flattening of inline markdown content.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};

/// Accumulates the plain text of an inline run (e.g. a heading body).
///
/// Text, inline code and math contribute their literal value, soft breaks
/// contribute `\n`. Images (including their alt text), raw HTML, footnote
/// references and hard breaks contribute nothing, so an image-only heading
/// flattens to an empty string.
///
/// This differs from mdast-style `toString`, which keeps inline HTML and alt
/// text: `## a <b>x</b>` gets the id `a-x` here, not `a-bxb`. The article
/// renderer flattens the same way, so ids and ToC links still agree.
#[derive(Debug, Default)]
pub struct InlineText {
    text: String,
    /// Nesting depth of open `Tag::Image`s.
    image_depth: usize,
}

impl InlineText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event from inside the inline run.
    pub fn push(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::Image { .. }) => self.image_depth += 1,
            Event::End(TagEnd::Image) => self.image_depth = self.image_depth.saturating_sub(1),
            _ if self.image_depth > 0 => {}
            Event::Text(s) | Event::Code(s) | Event::InlineMath(s) | Event::DisplayMath(s) => {
                self.text.push_str(s);
            }
            Event::SoftBreak => self.text.push('\n'),
            _ => {}
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn finish(self) -> String {
        self.text
    }
}

/// Numeric heading depth (1–6).
pub const fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
