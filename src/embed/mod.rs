//! Embedded static resources.
//!
//! - `template` - `{{ key }}` templates with typed variables
//! - `asset` - Templated assets with content-hash filenames
//! - [`PAGE_HTML`] - HTML document shell shared by post and index pages
//! - [`SCROLLSPY_JS`] - Browser side of the active-heading tracker
//! - [`STYLE_CSS`] - Minimal layout for the article and ToC sidebar

mod asset;
mod template;

pub use asset::{AssetKind, EmbeddedAsset, RenderedAsset};
pub use template::{Template, TemplateVars};

use crate::config::{SiteConfig, TocConfig};

/// Variables for page.html. `head`, `main` and `scripts` are markup and are
/// inserted as-is; `lang`, `title` and `stylesheet` must already be escaped.
#[derive(Debug, Default)]
pub struct PageVars {
    pub lang: String,
    pub title: String,
    pub head: String,
    pub stylesheet: String,
    pub layout: &'static str,
    pub main: String,
    pub scripts: String,
}

impl TemplateVars for PageVars {
    fn vars(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("lang", self.lang.as_str()),
            ("title", self.title.as_str()),
            ("head", self.head.as_str()),
            ("stylesheet", self.stylesheet.as_str()),
            ("layout", self.layout),
            ("main", self.main.as_str()),
            ("scripts", self.scripts.as_str()),
        ]
    }
}

pub const PAGE_HTML: Template<PageVars> = Template::new(include_str!("page.html"));

/// Variables for scrollspy.js, from the `[toc]` section. Values are stored
/// as JavaScript literals.
pub struct ScrollSpyVars {
    root_margin: String,
    threshold: String,
    selector: String,
}

impl ScrollSpyVars {
    pub fn from_config(toc: &TocConfig) -> Self {
        let selector = toc
            .levels()
            .map(|level| format!("article h{level}[id]"))
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            root_margin: js_string(&toc.observer_options().root_margin_css()),
            threshold: toc.threshold.to_string(),
            selector: js_string(&selector),
        }
    }
}

impl TemplateVars for ScrollSpyVars {
    fn vars(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("root_margin", self.root_margin.as_str()),
            ("threshold", self.threshold.as_str()),
            ("selector", self.selector.as_str()),
        ]
    }
}

/// JSON string literal, valid JavaScript.
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

pub const SCROLLSPY_JS: EmbeddedAsset<ScrollSpyVars> =
    EmbeddedAsset::new(AssetKind::JavaScript, "scrollspy", include_str!("scrollspy.js"));

/// The stylesheet has no variables.
pub struct NoVars;

impl TemplateVars for NoVars {
    fn vars(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
}

pub const STYLE_CSS: EmbeddedAsset<NoVars> =
    EmbeddedAsset::new(AssetKind::Css, "style", include_str!("style.css"));

/// Every asset a rendered page may reference, rendered for one config.
#[derive(Debug, Clone)]
pub struct SiteAssets {
    pub scrollspy: RenderedAsset,
    pub style: RenderedAsset,
}

impl SiteAssets {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            scrollspy: SCROLLSPY_JS.render(&ScrollSpyVars::from_config(&config.toc)),
            style: STYLE_CSS.render(&NoVars),
        }
    }

    pub fn all(&self) -> [&RenderedAsset; 2] {
        [&self.scrollspy, &self.style]
    }

    /// Find an asset by its fingerprinted filename.
    pub fn get(&self, filename: &str) -> Option<&RenderedAsset> {
        self.all().into_iter().find(|a| a.filename == filename)
    }
}
