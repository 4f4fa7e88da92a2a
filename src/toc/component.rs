//! The ToC sidebar component: headings + active signal + render.

use super::heading::{Heading, extract_in_range};
use super::outline::build_outline;
use super::render::render_toc;
use super::tracker::{ActiveId, ObserverOptions, ScrollSpy};
use crate::config::TocConfig;

/// Table of contents for one document.
///
/// Holds the headings that participate in the ToC (the configured level
/// range) and the active-heading signal. The outline itself is rebuilt on
/// every [`render`](Self::render).
#[derive(Debug)]
pub struct TableOfContents {
    headings: Vec<Heading>,
    active: ActiveId,
    config: TocConfig,
}

impl TableOfContents {
    /// Extract the ToC for a markdown document.
    pub fn from_markdown(markdown: &str, config: &TocConfig) -> Self {
        Self::new(extract_in_range(markdown, config.levels()), config)
    }

    pub fn new(headings: Vec<Heading>, config: &TocConfig) -> Self {
        Self {
            headings,
            active: ActiveId::new(),
            config: config.clone(),
        }
    }

    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Start tracking the visible heading. Tracking stops when the returned
    /// guard is dropped.
    pub fn mount(&self) -> ScrollSpy {
        ScrollSpy::attach(
            &self.headings,
            self.config.levels(),
            self.active.clone(),
            self.config.observer_options(),
        )
    }

    pub fn active_id(&self) -> Option<String> {
        self.active.get()
    }

    pub fn observer_options(&self) -> ObserverOptions {
        self.config.observer_options()
    }

    /// Render the sidebar with the current active heading highlighted.
    pub fn render(&self) -> String {
        let outline = build_outline(&self.headings, self.config.min_level);
        let active = self.active.get();
        render_toc(&outline, active.as_deref(), &self.config.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toc::tracker::IntersectionEntry;

    #[test]
    fn test_level_one_excluded_sub_at_root() {
        let toc = TableOfContents::from_markdown("# Title\n## Sub", &TocConfig::default());
        assert_eq!(toc.headings().len(), 1);
        let html = toc.render();
        assert!(html.contains("<nav><ul><li><a href=\"#sub\" class=\"toc-link\">Sub</a></li></ul></nav>"));
        assert!(!html.contains("#title"));
    }

    #[test]
    fn test_empty_document() {
        let toc = TableOfContents::from_markdown("just text", &TocConfig::default());
        assert!(toc.is_empty());
        assert_eq!(toc.render(), "");
    }

    #[test]
    fn test_mount_track_unmount() {
        let toc = TableOfContents::from_markdown(
            "## Alpha\n### Beta\n### Gamma\n## Delta",
            &TocConfig::default(),
        );
        let spy = toc.mount();
        let observer = spy.observer();

        observer.deliver(&[IntersectionEntry::new("beta", true)]);
        assert_eq!(toc.active_id().as_deref(), Some("beta"));
        assert!(toc.render().contains("class=\"toc-link active\""));

        drop(spy);
        observer.deliver(&[IntersectionEntry::new("delta", true)]);
        assert_eq!(toc.active_id().as_deref(), Some("beta"));
    }

    #[test]
    fn test_remount_shares_signal() {
        let toc = TableOfContents::from_markdown("## A\n## B", &TocConfig::default());
        {
            let spy = toc.mount();
            spy.observer().deliver(&[IntersectionEntry::new("a", true)]);
        }
        let spy = toc.mount();
        spy.observer().deliver(&[IntersectionEntry::new("b", true)]);
        assert_eq!(toc.active_id().as_deref(), Some("b"));
    }

    #[test]
    fn test_custom_title() {
        let config = TocConfig {
            title: "Contents".into(),
            ..TocConfig::default()
        };
        let toc = TableOfContents::from_markdown("## A", &config);
        assert!(toc.render().contains("<p class=\"toc-title\">Contents</p>"));
    }
}
