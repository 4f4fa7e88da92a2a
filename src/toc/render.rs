//! ToC sidebar markup.

use super::outline::OutlineItem;
use crate::utils::html::push_escaped;

/// Render an outline as the ToC sidebar.
///
/// Returns an empty string when the outline has no items.
///
/// ```text
/// <aside class="toc">
///   <p class="toc-title">On this page</p>
///   <nav><ul>
///     <li><a href="#alpha" class="toc-link">Alpha</a>
///       <ul class="toc-group">...</ul></li>
///   </ul></nav>
/// </aside>
/// ```
pub fn render_toc(items: &[OutlineItem<'_>], active: Option<&str>, title: &str) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(256);
    out.push_str("<aside class=\"toc\">\n<p class=\"toc-title\">");
    push_escaped(&mut out, title);
    out.push_str("</p>\n<nav>");
    render_list(&mut out, items, active, None);
    out.push_str("</nav>\n</aside>");
    out
}

/// Render one sibling list. Groups are placed inside the `<li>` of the link
/// they follow; a group with no preceding link gets its own `<li>`.
fn render_list(out: &mut String, items: &[OutlineItem<'_>], active: Option<&str>, class: Option<&str>) {
    match class {
        Some(class) => {
            out.push_str("<ul class=\"");
            out.push_str(class);
            out.push_str("\">");
        }
        None => out.push_str("<ul>"),
    }

    let mut open_li = false;
    for item in items {
        match item {
            OutlineItem::Link(heading) => {
                if open_li {
                    out.push_str("</li>");
                }
                out.push_str("<li>");
                render_link(out, &heading.id, &heading.text, active == Some(heading.id.as_str()));
                open_li = true;
            }
            OutlineItem::Group(children) => {
                if !open_li {
                    out.push_str("<li>");
                }
                render_list(out, children, active, Some("toc-group"));
                out.push_str("</li>");
                open_li = false;
            }
        }
    }
    if open_li {
        out.push_str("</li>");
    }

    out.push_str("</ul>");
}

fn render_link(out: &mut String, id: &str, text: &str, is_active: bool) {
    out.push_str("<a href=\"#");
    push_escaped(out, id);
    if is_active {
        out.push_str("\" class=\"toc-link active\" aria-current=\"location\">");
    } else {
        out.push_str("\" class=\"toc-link\">");
    }
    push_escaped(out, text);
    out.push_str("</a>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::heading::{Heading, extract_headings};
    use crate::toc::outline::build_outline;

    fn headings(markdown: &str) -> Vec<Heading> {
        extract_headings(markdown).collect()
    }

    #[test]
    fn test_empty_outline_renders_nothing() {
        assert_eq!(render_toc(&[], None, "On this page"), "");
    }

    #[test]
    fn test_nested_markup() {
        let hs = headings("## Alpha\n### Beta\n### Gamma\n## Delta");
        let html = render_toc(&build_outline(&hs, 2), None, "On this page");
        assert!(html.contains(
            "<nav><ul><li><a href=\"#alpha\" class=\"toc-link\">Alpha</a>\
             <ul class=\"toc-group\"><li><a href=\"#beta\" class=\"toc-link\">Beta</a></li>\
             <li><a href=\"#gamma\" class=\"toc-link\">Gamma</a></li></ul></li>\
             <li><a href=\"#delta\" class=\"toc-link\">Delta</a></li></ul></nav>"
        ));
        assert!(html.contains("<p class=\"toc-title\">On this page</p>"));
    }

    #[test]
    fn test_active_marked() {
        let hs = headings("## Alpha\n### Beta");
        let html = render_toc(&build_outline(&hs, 2), Some("beta"), "Contents");
        assert!(html.contains(
            "<a href=\"#beta\" class=\"toc-link active\" aria-current=\"location\">Beta</a>"
        ));
        assert!(html.contains("<a href=\"#alpha\" class=\"toc-link\">Alpha</a>"));
        assert_eq!(html.matches("active").count(), 1);
    }

    #[test]
    fn test_leading_group_gets_own_item() {
        let hs = headings("### Intro\n## Main");
        let html = render_toc(&build_outline(&hs, 2), None, "t");
        assert!(html.contains(
            "<ul><li><ul class=\"toc-group\"><li><a href=\"#intro\" class=\"toc-link\">Intro</a></li></ul></li>\
             <li><a href=\"#main\" class=\"toc-link\">Main</a></li></ul>"
        ));
    }

    #[test]
    fn test_text_escaped() {
        let hs = headings("## Vec&lt;T&gt; & \"friends\"");
        let html = render_toc(&build_outline(&hs, 2), None, "<toc>");
        assert!(html.contains("Vec&lt;T&gt; &amp; &quot;friends&quot;"));
        assert!(html.contains("&lt;toc&gt;"));
        assert!(html.contains("href=\"#vect--friends\""));
    }

    #[test]
    fn test_balanced_list_tags() {
        let hs = headings("### x\n## a\n#### b\n### c\n## d\n### e\n#### f\n## g\n#### h");
        let html = render_toc(&build_outline(&hs, 2), None, "t");
        assert_eq!(html.matches("<ul").count(), html.matches("</ul>").count());
        assert_eq!(html.matches("<li>").count(), html.matches("</li>").count());
    }
}
