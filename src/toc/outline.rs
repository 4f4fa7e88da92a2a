//! Flat heading list → nested outline.
//!
//! The nesting is a stack machine over sibling lists. A heading one or more
//! levels deeper than the current level opens exactly one new list, so a
//! jump from `h2` straight to `h4` nests a single step, not two. Climbing
//! back up closes one list per level, stopping at the root.

use super::heading::Heading;

/// One entry of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineItem<'a> {
    /// A navigable heading.
    Link(&'a Heading),
    /// A nested list, belonging to the link right before it (if any).
    Group(Vec<OutlineItem<'a>>),
}

impl<'a> OutlineItem<'a> {
    pub fn heading(&self) -> Option<&'a Heading> {
        match self {
            Self::Link(heading) => Some(*heading),
            Self::Group(_) => None,
        }
    }
}

/// Build the nested outline for `headings`.
///
/// `base_level` is the shallowest heading level the outline handles (the
/// level a root entry normally has). Every input heading appears exactly
/// once in the result, in input order.
pub fn build_outline(headings: &[Heading], base_level: u8) -> Vec<OutlineItem<'_>> {
    let mut stack: Vec<Vec<OutlineItem<'_>>> = vec![Vec::new()];
    let mut current_level = base_level;

    for heading in headings {
        let link = OutlineItem::Link(heading);

        if heading.level > current_level {
            stack.push(vec![link]);
            current_level = heading.level;
            continue;
        }

        if heading.level < current_level {
            while current_level > heading.level && stack.len() > 1 {
                close_group(&mut stack);
                current_level -= 1;
            }
            current_level = heading.level;
        }

        push_top(&mut stack, link);
    }

    while stack.len() > 1 {
        close_group(&mut stack);
    }

    stack.pop().unwrap_or_default()
}

/// Pop the top sibling list and append it, wrapped, to the new top.
fn close_group<'a>(stack: &mut Vec<Vec<OutlineItem<'a>>>) {
    if let Some(children) = stack.pop() {
        push_top(stack, OutlineItem::Group(children));
    }
}

fn push_top<'a>(stack: &mut [Vec<OutlineItem<'a>>], item: OutlineItem<'a>) {
    if let Some(top) = stack.last_mut() {
        top.push(item);
    }
}

/// Links of an outline in depth-first order, with their nesting depth.
pub fn links<'a>(items: &[OutlineItem<'a>]) -> Vec<(usize, &'a Heading)> {
    fn walk<'a>(items: &[OutlineItem<'a>], depth: usize, out: &mut Vec<(usize, &'a Heading)>) {
        for item in items {
            match item {
                OutlineItem::Link(heading) => out.push((depth, *heading)),
                OutlineItem::Group(children) => walk(children, depth + 1, out),
            }
        }
    }

    let mut out = Vec::new();
    walk(items, 0, &mut out);
    out
}

/// Nesting depth of the first link with `id`.
pub fn depth_of(items: &[OutlineItem<'_>], id: &str) -> Option<usize> {
    links(items)
        .into_iter()
        .find(|(_, heading)| heading.id == id)
        .map(|(depth, _)| depth)
}
