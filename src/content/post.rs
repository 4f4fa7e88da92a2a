//! A single markdown post.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::error::ContentError;
use super::meta::{FrontmatterExtractor, PostMeta};

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Path relative to the content directory, without extension,
    /// `/`-separated. `index.md` collapses to its directory.
    pub slug: String,
    pub meta: PostMeta,
    /// Markdown body with the frontmatter removed.
    #[serde(skip)]
    pub body: String,
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Read and parse a post file below `content_dir`.
    ///
    /// Returns `Ok(None)` for files that do not map to a post slug
    /// (non-markdown files and a top-level `index.md`).
    pub fn read(content_dir: &Path, path: &Path) -> Result<Option<Self>, ContentError> {
        let Some(slug) = slug_for(content_dir, path) else {
            return Ok(None);
        };
        let content =
            fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        Self::parse(slug, path, &content).map(Some)
    }

    /// Parse post source text.
    pub fn parse(slug: String, source: &Path, content: &str) -> Result<Self, ContentError> {
        let (meta, body) = FrontmatterExtractor::extract(content)
            .map_err(|err| ContentError::Frontmatter(source.to_path_buf(), err))?;
        Ok(Self {
            slug,
            meta,
            body: body.to_owned(),
            source: source.to_path_buf(),
        })
    }

    /// Frontmatter title, falling back to the last slug segment.
    pub fn title(&self) -> &str {
        self.meta
            .title
            .as_deref()
            .unwrap_or_else(|| self.slug.rsplit('/').next().unwrap_or(&self.slug))
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.description.as_deref().filter(|d| !d.is_empty())
    }

    pub const fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Slug split into route segments: `2024/hello` → `["2024", "hello"]`.
    pub fn segments(&self) -> Vec<String> {
        self.slug.split('/').map(str::to_owned).collect()
    }
}

/// Slug of a markdown file relative to `content_dir`.
///
/// ```text
/// content/hello.md            → hello
/// content/2024/intro.md       → 2024/intro
/// content/2024/trip/index.md  → 2024/trip
/// content/index.md            → None
/// content/notes.txt           → None
/// ```
pub fn slug_for(content_dir: &Path, path: &Path) -> Option<String> {
    if path.extension()? != "md" {
        return None;
    }
    let relative = path.strip_prefix(content_dir).ok()?.with_extension("");

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_str()?),
            _ => return None,
        }
    }
    if segments.last() == Some(&"index") {
        segments.pop();
    }

    (!segments.is_empty()).then(|| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_for() {
        let dir = Path::new("/site/content");
        assert_eq!(slug_for(dir, &dir.join("hello.md")).as_deref(), Some("hello"));
        assert_eq!(
            slug_for(dir, &dir.join("2024/intro.md")).as_deref(),
            Some("2024/intro")
        );
        assert_eq!(
            slug_for(dir, &dir.join("2024/trip/index.md")).as_deref(),
            Some("2024/trip")
        );
        assert_eq!(slug_for(dir, &dir.join("index.md")), None);
        assert_eq!(slug_for(dir, &dir.join("notes.txt")), None);
        assert_eq!(slug_for(dir, Path::new("/elsewhere/a.md")), None);
    }

    #[test]
    fn test_parse_and_fallback_title() {
        let post = Post::parse("2024/hello-world".into(), Path::new("x.md"), "## Body").unwrap();
        assert_eq!(post.title(), "hello-world");
        assert_eq!(post.description(), None);
        assert_eq!(post.segments(), vec!["2024", "hello-world"]);
        assert_eq!(post.body, "## Body");
    }

    #[test]
    fn test_parse_with_frontmatter() {
        let post = Post::parse(
            "a".into(),
            Path::new("a.md"),
            "---\ntitle: A post\ndescription: About a\n---\n## One",
        )
        .unwrap();
        assert_eq!(post.title(), "A post");
        assert_eq!(post.description(), Some("About a"));
        assert_eq!(post.body, "## One");
    }

    #[test]
    fn test_bad_toml_names_file() {
        let err = Post::parse("a".into(), Path::new("posts/a.md"), "+++\n= 1\n+++\n").unwrap_err();
        assert!(matches!(err, ContentError::Frontmatter(ref p, _) if p == Path::new("posts/a.md")));
        assert!(err.to_string().contains("posts/a.md"));
    }
}
