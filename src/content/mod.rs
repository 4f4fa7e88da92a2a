//! Markdown posts: frontmatter, slugs and the post collection.

mod collection;
mod error;
mod meta;
mod post;

pub use collection::Collection;
pub use error::ContentError;
pub use meta::{FrontmatterExtractor, PostMeta};
pub use post::{Post, slug_for};
