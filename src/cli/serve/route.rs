//! URL routing for the dev server.

use std::path::{Path, PathBuf};

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a `Location` path.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// What a request path points at.
#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Index,
    /// `/assets/<filename>`
    Asset(String),
    /// `/posts/<rest>`: a post slug or a file next to the posts.
    Posts { rest: String, trailing_slash: bool },
    NotFound(String),
}

impl Route {
    pub fn parse(url: &str) -> Self {
        let path = decode_path(url);
        let trailing_slash = path.ends_with('/');
        let clean = path.trim_matches('/');

        if clean.is_empty() || clean == "index.html" {
            return Self::Index;
        }
        if let Some(name) = clean.strip_prefix("assets/") {
            return Self::Asset(name.to_owned());
        }
        if let Some(rest) = clean.strip_prefix("posts/") {
            let rest = rest.strip_suffix("/index.html").unwrap_or(rest);
            return Self::Posts {
                rest: rest.trim_matches('/').to_owned(),
                trailing_slash: trailing_slash || clean.ends_with("/index.html"),
            };
        }
        Self::NotFound(clean.to_owned())
    }
}

/// Decode percent-escapes and drop the query string and fragment.
fn decode_path(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default()
}

/// Canonical URL of a post page, with the trailing slash.
pub fn post_location(slug: &str) -> String {
    format!("/posts/{}/", utf8_percent_encode(slug, PATH))
}

/// Resolve `relative` to a non-markdown file under `root`.
///
/// Rejects anything that escapes `root`, including through symlinks.
pub fn resolve_file(relative: &str, root: &Path) -> Option<PathBuf> {
    if relative.split('/').any(|part| part == "..") {
        return None;
    }

    let canonical = root.join(relative).canonicalize().ok()?;
    let root = root.canonicalize().ok()?;
    if !canonical.starts_with(&root) || !canonical.is_file() {
        return None;
    }
    if canonical.extension().is_some_and(|ext| ext == "md") {
        return None;
    }
    Some(canonical)
}
