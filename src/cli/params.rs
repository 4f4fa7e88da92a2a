//! `quire params`: list every post route for static generation.

use anyhow::Result;
use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::Collection;

/// One route: `{"slug": ["2024", "hello"]}`.
#[derive(Debug, Serialize)]
struct StaticParam {
    slug: Vec<String>,
}

pub fn run_params(pretty: bool, config: &SiteConfig) -> Result<()> {
    let collection = Collection::load(&config.build.content, config.build.skip_drafts)?;
    println!("{}", format_params(&collection, pretty)?);
    Ok(())
}

fn format_params(collection: &Collection, pretty: bool) -> Result<String> {
    let params: Vec<_> = collection
        .static_params()
        .into_iter()
        .map(|slug| StaticParam { slug })
        .collect();
    let json = if pretty {
        serde_json::to_string_pretty(&params)?
    } else {
        serde_json::to_string(&params)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use std::path::Path;

    #[test]
    fn test_format_params() {
        let posts = ["2024/hello", "about"]
            .into_iter()
            .map(|slug| Post::parse(slug.into(), Path::new("x.md"), "").unwrap())
            .collect();
        let collection = Collection::from_posts(posts);

        assert_eq!(
            format_params(&collection, false).unwrap(),
            r#"[{"slug":["2024","hello"]},{"slug":["about"]}]"#
        );
        assert!(format_params(&collection, true).unwrap().contains("\n"));
    }

    #[test]
    fn test_empty_collection() {
        let collection = Collection::default();
        assert_eq!(format_params(&collection, false).unwrap(), "[]");
    }
}
