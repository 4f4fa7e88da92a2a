//! Content loading errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no post with slug `{0}`")]
    NotFound(String),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML frontmatter in `{0}`")]
    Frontmatter(PathBuf, #[source] toml::de::Error),
}

impl ContentError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
