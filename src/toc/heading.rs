//! Heading extraction from markdown.

use std::ops::RangeInclusive;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use super::slug::slugify;
use crate::markdown::{self, InlineText, heading_depth};

/// A document heading.
///
/// Produced once per render, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Anchor id, `slugify(text)`. Not unique: equal texts collide.
    pub id: String,
    /// Display label (flattened inline text).
    pub text: String,
    /// Heading depth, 1–6.
    pub level: u8,
}

impl Heading {
    /// Create a heading, deriving its id from `text`.
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        let text = text.into();
        Self {
            id: slugify(&text),
            text,
            level,
        }
    }
}

/// Lazy iterator over the headings of a markdown document.
///
/// Created by [`extract_headings`]. Each call to `next` advances the
/// underlying parser only up to the end of the next non-empty heading.
pub struct Headings<'a> {
    parser: Parser<'a>,
}

impl Iterator for Headings<'_> {
    type Item = Heading;

    fn next(&mut self) -> Option<Heading> {
        let mut current: Option<(u8, InlineText)> = None;

        for event in self.parser.by_ref() {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((heading_depth(level), InlineText::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    let Some((level, text)) = current.take() else {
                        continue;
                    };
                    let text = text.finish();
                    // Image-only (or otherwise textless) headings are dropped
                    if text.is_empty() {
                        continue;
                    }
                    return Some(Heading::new(text, level));
                }
                event => {
                    if let Some((_, text)) = current.as_mut() {
                        text.push(&event);
                    }
                }
            }
        }

        None
    }
}

/// Extract all headings from `markdown`, in document order.
///
/// Never fails: unparseable constructs degrade to plain text, so the worst
/// case is an empty sequence.
pub fn extract_headings(markdown: &str) -> Headings<'_> {
    Headings {
        parser: markdown::parser(markdown),
    }
}

/// Extract headings whose level lies in `levels` (the ToC range).
pub fn extract_in_range(markdown: &str, levels: RangeInclusive<u8>) -> Vec<Heading> {
    extract_headings(markdown)
        .filter(|h| levels.contains(&h.level))
        .collect()
}
