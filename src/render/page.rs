//! Full HTML documents for posts and the index.

use serde::Serialize;

use super::article::render_article;
use crate::config::SiteConfig;
use crate::content::{Collection, Post};
use crate::embed::{PAGE_HTML, PageVars, SiteAssets};
use crate::toc::TableOfContents;
use crate::utils::html::{escape, push_escaped};

/// `<title>` and `<meta name="description">` of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Metadata for a post page. An unknown post yields empty metadata.
pub fn page_metadata(post: Option<&Post>) -> PageMetadata {
    let Some(post) = post else {
        return PageMetadata::default();
    };
    PageMetadata {
        title: Some(post.title().to_owned()),
        description: post.description().map(str::to_owned),
    }
}

/// Render a post as a complete HTML document: the article and, when the
/// post has headings in the configured range, the ToC sidebar.
pub fn render_post_page(post: &Post, config: &SiteConfig, assets: &SiteAssets) -> String {
    let meta = page_metadata(Some(post));

    let mut main = String::with_capacity(post.body.len() * 2);
    main.push_str("<article>\n<h1>");
    push_escaped(&mut main, post.title());
    main.push_str("</h1>\n");
    if let Some(description) = post.description() {
        main.push_str("<p class=\"description\">");
        push_escaped(&mut main, description);
        main.push_str("</p>\n");
    }
    push_byline(&mut main, post, config);
    main.push_str("<hr>\n");
    main.push_str(&render_article(&post.body));
    main.push_str("</article>\n");

    let mut scripts = String::new();
    if config.toc.enable {
        let toc = TableOfContents::from_markdown(&post.body, &config.toc);
        if !toc.is_empty() {
            main.push_str(&toc.render());
            scripts = format!(
                "<script src=\"{}\" defer></script>",
                escape(&config.build.url_for(&assets.scrollspy.output_path()))
            );
        }
    }

    render_document(config, assets, &meta, "post", main, scripts)
}

/// `<p class="byline">date · author</p>`, when either is known.
fn push_byline(out: &mut String, post: &Post, config: &SiteConfig) {
    let author = post
        .meta
        .author
        .as_deref()
        .or_else(|| Some(config.site.author.as_str()).filter(|a| !a.is_empty()));
    let parts: Vec<&str> = [post.meta.date.as_deref(), author].into_iter().flatten().collect();
    if parts.is_empty() {
        return;
    }
    out.push_str("<p class=\"byline\">");
    push_escaped(out, &parts.join(" · "));
    out.push_str("</p>\n");
}

/// Render the post listing, newest first.
pub fn render_index_page(collection: &Collection, config: &SiteConfig, assets: &SiteAssets) -> String {
    let meta = PageMetadata {
        title: None,
        description: Some(config.site.description.clone()).filter(|d| !d.is_empty()),
    };

    let mut main = String::with_capacity(256 + collection.len() * 128);
    main.push_str("<h1>");
    push_escaped(&mut main, site_title(config));
    main.push_str("</h1>\n");
    if let Some(description) = &meta.description {
        main.push_str("<p class=\"description\">");
        push_escaped(&mut main, description);
        main.push_str("</p>\n");
    }

    main.push_str("<ul class=\"post-list\">\n");
    for post in collection.newest_first() {
        let href = config.build.url_for(&format!("posts/{}/", post.slug));
        main.push_str("<li><a href=\"");
        push_escaped(&mut main, &href);
        main.push_str("\">");
        push_escaped(&mut main, post.title());
        main.push_str("</a>");
        if let Some(date) = &post.meta.date {
            main.push_str(" <time>");
            push_escaped(&mut main, date);
            main.push_str("</time>");
        }
        if let Some(description) = post.description() {
            main.push_str("<p>");
            push_escaped(&mut main, description);
            main.push_str("</p>");
        }
        main.push_str("</li>\n");
    }
    main.push_str("</ul>");

    render_document(config, assets, &meta, "index", main, String::new())
}

fn site_title(config: &SiteConfig) -> &str {
    if config.site.title.is_empty() {
        "Posts"
    } else {
        &config.site.title
    }
}

/// Wrap page content in the HTML shell.
fn render_document(
    config: &SiteConfig,
    assets: &SiteAssets,
    meta: &PageMetadata,
    layout: &'static str,
    main: String,
    scripts: String,
) -> String {
    let title = match (&meta.title, config.site.title.is_empty()) {
        (Some(title), true) => title.clone(),
        (Some(title), false) => format!("{title} | {}", config.site.title),
        (None, _) => site_title(config).to_owned(),
    };

    let mut head = String::new();
    if let Some(description) = &meta.description {
        head.push_str("<meta name=\"description\" content=\"");
        push_escaped(&mut head, description);
        head.push_str("\">");
    }

    PAGE_HTML.render(&PageVars {
        lang: escape(&config.site.language).into_owned(),
        title: escape(&title).into_owned(),
        head,
        stylesheet: escape(&config.build.url_for(&assets.style.output_path())).into_owned(),
        layout,
        main,
        scripts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::Path;

    fn post(slug: &str, source: &str) -> Post {
        Post::parse(slug.into(), Path::new("x.md"), source).unwrap()
    }

    fn setup(extra: &str) -> (SiteConfig, SiteAssets) {
        let config = test_parse_config(extra);
        let assets = SiteAssets::from_config(&config);
        (config, assets)
    }

    #[test]
    fn test_page_metadata() {
        let p = post("a", "---\ntitle: Hello\ndescription: World\n---\n");
        assert_eq!(
            page_metadata(Some(&p)),
            PageMetadata {
                title: Some("Hello".into()),
                description: Some("World".into()),
            }
        );
        assert_eq!(page_metadata(None), PageMetadata::default());
    }

    #[test]
    fn test_post_page_layout() {
        let (config, assets) = setup("[site]\ntitle = \"Notes\"");
        let p = post(
            "a",
            "---\ntitle: Hello <World>\ndescription: Intro\n---\n# Big\n## Alpha\n### Beta\n",
        );
        let html = render_post_page(&p, &config, &assets);

        assert!(html.contains("<title>Hello &lt;World&gt; | Notes</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Intro\">"));
        assert!(html.contains("<h1>Hello &lt;World&gt;</h1>\n<p class=\"description\">Intro</p>\n<hr>"));
        assert!(html.contains("<h2 id=\"alpha\">Alpha</h2>"));
        assert!(html.contains("<aside class=\"toc\">"));
        assert!(html.contains("href=\"#beta\""));
        assert!(!html.contains("href=\"#big\""));
        assert!(html.contains(&format!(
            "<script src=\"/assets/{}\" defer></script>",
            assets.scrollspy.filename
        )));
        assert!(html.contains("<main class=\"post\">"));
    }

    #[test]
    fn test_post_without_headings_has_no_toc() {
        let (config, assets) = setup("");
        let html = render_post_page(&post("a", "just text\n\n# Only h1"), &config, &assets);
        assert!(!html.contains("class=\"toc\""));
        assert!(!html.contains("<script"));
        assert!(html.contains("<title>a</title>"));
        assert!(!html.contains("name=\"description\""));
    }

    #[test]
    fn test_toc_disabled() {
        let (config, assets) = setup("[toc]\nenable = false");
        let html = render_post_page(&post("a", "## Alpha"), &config, &assets);
        assert!(!html.contains("class=\"toc\""));
        assert!(html.contains("<h2 id=\"alpha\">"));
    }

    #[test]
    fn test_byline_falls_back_to_site_author() {
        let (config, assets) = setup("[site]\nauthor = \"Sam\"");
        let p = post("a", "---\ndate: 2024-05-01\n---\nx");
        let html = render_post_page(&p, &config, &assets);
        assert!(html.contains("<p class=\"byline\">2024-05-01 · Sam</p>"));
    }

    #[test]
    fn test_index_page() {
        let (mut config, assets) = setup("[site]\ntitle = \"Notes\"\ndescription = \"Things\"");
        config.build.path_prefix = "blog".into();
        let collection = Collection::from_posts(vec![
            post("old", "---\ntitle: Old\ndate: 2023-01-01\n---\n"),
            post("2024/new", "---\ntitle: New & shiny\ndate: 2024-01-01\ndescription: d\n---\n"),
        ]);
        let html = render_index_page(&collection, &config, &assets);

        assert!(html.contains("<title>Notes</title>"));
        let new = html.find("href=\"/blog/posts/2024/new/\">New &amp; shiny</a> <time>2024-01-01</time><p>d</p>").unwrap();
        let old = html.find("href=\"/blog/posts/old/\">Old</a>").unwrap();
        assert!(new < old);
        assert!(html.contains(&format!("href=\"/blog/assets/{}\"", assets.style.filename)));
    }
}
