//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "Notes"
//! description = "Things I wrote down"
//! author = "Jane Doe"
//! url = "https://example.com/blog"
//! language = "en"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site metadata used for page titles and the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title, appended to post titles in `<title>`.
    pub title: String,

    /// Site description, used on the index page.
    pub description: String,

    /// Default author for posts without one.
    pub author: String,

    /// Public base URL. Its path becomes the URL prefix of every link.
    pub url: Option<String>,

    /// Language code for `<html lang>`.
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            author: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

impl SiteInfoConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(url) = &self.url
            && url::Url::parse(url).is_err()
        {
            diag.error_with_hint(
                FieldPath::new("site.url"),
                format!("invalid URL `{url}`"),
                "use an absolute URL such as \"https://example.com/\"",
            );
        }
    }
}
