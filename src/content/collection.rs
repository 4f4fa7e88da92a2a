//! The set of posts under the content directory.

use std::path::Path;

use jwalk::WalkDir;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::error::ContentError;
use super::post::Post;
use crate::{debug, log};

/// All posts, sorted by slug, with a slug index.
#[derive(Debug, Default)]
pub struct Collection {
    posts: Vec<Post>,
    by_slug: FxHashMap<String, usize>,
}

impl Collection {
    /// Walk `content_dir` for `*.md` files and parse them in parallel.
    ///
    /// Files that fail to read or parse are logged and skipped. Drafts are
    /// dropped when `skip_drafts` is set.
    pub fn load(content_dir: &Path, skip_drafts: bool) -> Result<Self, ContentError> {
        content_dir
            .read_dir()
            .map_err(|err| ContentError::Io(content_dir.to_path_buf(), err))?;

        let files: Vec<_> = WalkDir::new(content_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "md"))
            .collect();

        let posts: Vec<Post> = files
            .par_iter()
            .filter_map(|path| match Post::read(content_dir, path) {
                Ok(post) => post,
                Err(err) => {
                    log!("content"; "skipping {}: {:#}", path.display(), anyhow::Error::from(err));
                    None
                }
            })
            .filter(|post| {
                let keep = !(skip_drafts && post.is_draft());
                if !keep {
                    debug!("content"; "skipping draft {}", post.slug);
                }
                keep
            })
            .collect();

        Ok(Self::from_posts(posts))
    }

    /// Build from already-parsed posts. On duplicate slugs the first post
    /// by source path wins.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        posts.sort_by(|a, b| a.slug.cmp(&b.slug).then_with(|| a.source.cmp(&b.source)));
        posts.dedup_by(|later, earlier| {
            let dup = later.slug == earlier.slug;
            if dup {
                log!("content"; "duplicate slug `{}`: ignoring {}", later.slug, later.source.display());
            }
            dup
        });

        let by_slug = posts
            .iter()
            .enumerate()
            .map(|(i, post)| (post.slug.clone(), i))
            .collect();
        Self { posts, by_slug }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Look up a post by slug. Surrounding slashes are ignored, so
    /// `/2024/hello/` and `2024/hello` resolve the same post.
    pub fn find(&self, slug: &str) -> Option<&Post> {
        let slug = slug.trim_matches('/');
        self.by_slug.get(slug).map(|&i| &self.posts[i])
    }

    /// Look up a post by route segments (`["2024", "hello"]`).
    pub fn find_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Post> {
        let slug = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("/");
        self.find(&slug)
    }

    /// Like [`find`](Self::find), with an unknown slug as an error.
    pub fn resolve(&self, slug: &str) -> Result<&Post, ContentError> {
        self.find(slug)
            .ok_or_else(|| ContentError::NotFound(slug.trim_matches('/').to_owned()))
    }

    /// Route segments of every post, for static generation.
    pub fn static_params(&self) -> Vec<Vec<String>> {
        self.posts.iter().map(Post::segments).collect()
    }

    /// Posts ordered for listing: newest date first, undated last, then slug.
    pub fn newest_first(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| match (&a.meta.date, &b.meta.date) {
            (Some(x), Some(y)) => y.cmp(x).then_with(|| a.slug.cmp(&b.slug)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.slug.cmp(&b.slug),
        });
        posts
    }
}
