//! Shared markdown parsing setup.
//!
//! The heading extractor and the article renderer must see the same event
//! stream, otherwise heading text (and therefore anchor ids) can diverge.
//! Both go through [`parser`] and [`InlineText`].

mod text;

pub use text::{InlineText, heading_depth};

use pulldown_cmark::{Options, Parser};

/// Extensions enabled for every parse: tables, footnotes, strikethrough,
/// task lists and math.
///
/// Heading attributes (`# Title {#custom}`) stay disabled: anchor ids are
/// always derived from the heading text.
pub const OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_MATH);

/// Create a parser over `markdown` with [`OPTIONS`].
///
/// CommonMark parsing is total: any input produces an event stream, so
/// malformed markup degrades to best-effort output instead of an error.
pub fn parser(markdown: &str) -> Parser<'_> {
    Parser::new_ext(markdown, OPTIONS)
}
