//! `quire toc`: print the headings of a single post.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::TocArgs;
use crate::config::SiteConfig;
use crate::content::{Collection, FrontmatterExtractor};
use crate::log;
use crate::toc::{Heading, build_outline, extract_headings, extract_in_range, outline::links};
use crate::utils::path::resolve_path;

pub fn run_toc(args: &TocArgs, config: &SiteConfig) -> Result<()> {
    let markdown = load_markdown(&args.target, config)?;

    let (headings, base_level) = if args.all_levels {
        (extract_headings(&markdown).collect::<Vec<_>>(), 1)
    } else {
        (
            extract_in_range(&markdown, config.toc.levels()),
            config.toc.min_level,
        )
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&headings)?);
    } else if headings.is_empty() {
        log!("toc"; "no headings in `{}`", args.target);
    } else {
        print!("{}", format_outline(&headings, base_level));
    }
    Ok(())
}

/// Markdown body of `target`: a `.md` file path, or a post slug.
fn load_markdown(target: &str, config: &SiteConfig) -> Result<String> {
    if target.ends_with(".md") {
        let path = resolve_path(Path::new(target), &config.build.content);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let (_, body) = FrontmatterExtractor::extract(&source)
            .with_context(|| format!("Invalid frontmatter in {}", path.display()))?;
        return Ok(body.to_owned());
    }

    let collection = Collection::load(&config.build.content, config.build.skip_drafts)?;
    Ok(collection.resolve(target)?.body.clone())
}

/// Indented outline, one `- text (#id)` line per heading.
fn format_outline(headings: &[Heading], base_level: u8) -> String {
    let outline = build_outline(headings, base_level);
    links(&outline)
        .into_iter()
        .map(|(depth, heading)| format!("{}- {} (#{})\n", "  ".repeat(depth), heading.text, heading.id))
        .collect()
}
