//! Markdown body → HTML with heading anchors.

use std::collections::VecDeque;

use pulldown_cmark::{CowStr, Event, Tag, TagEnd, html};

use crate::markdown::{self, InlineText};
use crate::toc::slugify;

/// Render a markdown body to HTML.
///
/// Every heading gets `id="{slugify(text)}"` computed from the same
/// flattened text the ToC extractor sees, so ToC links always resolve.
/// Headings whose text slugifies to nothing get no id.
pub fn render_article(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, HeadingIds::new(markdown::parser(markdown)));
    out
}

/// Event adapter that fills in heading ids.
///
/// A heading's id is only known at its end tag, so the heading's events are
/// buffered and replayed after the rewritten start tag.
struct HeadingIds<'a, I> {
    inner: I,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I: Iterator<Item = Event<'a>>> HeadingIds<'a, I> {
    fn new(inner: I) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for HeadingIds<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        match self.inner.next()? {
            Event::Start(Tag::Heading {
                level,
                classes,
                attrs,
                ..
            }) => {
                let mut text = InlineText::new();
                for event in self.inner.by_ref() {
                    let end = matches!(event, Event::End(TagEnd::Heading(_)));
                    if !end {
                        text.push(&event);
                    }
                    self.pending.push_back(event);
                    if end {
                        break;
                    }
                }

                let slug = slugify(text.as_str());
                let id = (!slug.is_empty()).then(|| CowStr::from(slug));
                Some(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }))
            }
            event => Some(event),
        }
    }
}
