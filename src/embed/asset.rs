//! Embedded assets written with content-hash filenames.

use super::template::{Template, TemplateVars};
use crate::utils::{hash, mime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    JavaScript,
    Css,
}

impl AssetKind {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::JavaScript => "js",
            Self::Css => "css",
        }
    }

    pub const fn mime(self) -> &'static str {
        match self {
            Self::JavaScript => mime::types::JAVASCRIPT,
            Self::Css => mime::types::CSS,
        }
    }
}

/// A templated asset served from `assets/`.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedAsset<V> {
    kind: AssetKind,
    name: &'static str,
    template: Template<V>,
}

/// Rendered asset content plus its fingerprinted filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAsset {
    pub kind: AssetKind,
    /// `scrollspy.1a2b3c4d.js`
    pub filename: String,
    pub content: String,
}

impl RenderedAsset {
    /// Path below the output root, `assets/<filename>`.
    pub fn output_path(&self) -> String {
        format!("assets/{}", self.filename)
    }
}

impl<V> EmbeddedAsset<V> {
    pub const fn new(kind: AssetKind, name: &'static str, content: &'static str) -> Self {
        Self {
            kind,
            name,
            template: Template::new(content),
        }
    }
}

impl<V: TemplateVars> EmbeddedAsset<V> {
    pub fn render(&self, vars: &V) -> RenderedAsset {
        let content = self.template.render(vars);
        let filename = format!(
            "{}.{}.{}",
            self.name,
            hash::fingerprint(&content),
            self.kind.extension()
        );
        RenderedAsset {
            kind: self.kind,
            filename,
            content,
        }
    }
}
