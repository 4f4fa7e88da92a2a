//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"     # Markdown posts (relative to site root)
//! output = "public"       # Generated site (relative to site root)
//! skip_drafts = false     # Leave `draft: true` posts out of the build
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content source directory.
    pub content: PathBuf,

    /// Build output directory.
    pub output: PathBuf,

    /// Skip posts marked `draft`.
    pub skip_drafts: bool,

    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,

    /// URL path prefix derived from `site.url`, e.g. `blog` (no slashes).
    #[serde(skip)]
    pub path_prefix: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            skip_drafts: false,
            clean: false,
            path_prefix: String::new(),
        }
    }
}

impl BuildConfig {
    /// Absolute URL for a site-relative path, honouring `path_prefix`.
    ///
    /// `url_for("posts/a/")` is `/posts/a/`, or `/blog/posts/a/` under a prefix.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.path_prefix.is_empty() {
            format!("/{path}")
        } else {
            format!("/{}/{path}", self.path_prefix)
        }
    }

    /// Why `content` and `output` cannot be used together, with a hint.
    ///
    /// Nested directories are rejected both ways: an output holding the
    /// content would be wiped by `--clean`, and an output inside the content
    /// would be copied into itself as colocated files on the next build.
    pub fn layout_conflict(&self) -> Option<(&'static str, &'static str)> {
        if self.output == self.content {
            Some((
                "output directory must differ from the content directory",
                "use a sibling directory such as `public`",
            ))
        } else if self.content.starts_with(&self.output) {
            Some((
                "output directory contains the content directory",
                "`--clean` would delete your posts; use a sibling directory such as `public`",
            ))
        } else if self.output.starts_with(&self.content) {
            Some((
                "output directory is inside the content directory",
                "move `output` next to `content`, not under it",
            ))
        } else {
            None
        }
    }

    /// Validate after path normalization.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.content.is_dir() {
            diag.error_with_hint(
                FieldPath::new("build.content"),
                format!("content directory `{}` does not exist", self.content.display()),
                "create it or point `content` at your posts",
            );
        }
        if let Some((message, hint)) = self.layout_conflict() {
            diag.error_with_hint(FieldPath::new("build.output"), message, hint);
        }
    }
}
