//! Static site build.
//!
//! ```text
//! prepare output ─► load posts ─► render posts (rayon) ─► index ─► assets ─► copy files
//! ```
//!
//! Output layout:
//!
//! ```text
//! public/
//! ├── index.html
//! ├── assets/scrollspy.<hash>.js
//! ├── assets/style.<hash>.css
//! └── posts/<slug>/index.html
//! ```

use crate::{
    config::SiteConfig,
    content::Collection,
    debug,
    embed::SiteAssets,
    log,
    logger::ProgressLine,
    render::{render_index_page, render_post_page},
};
use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Counts of what a build wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub posts: usize,
    pub assets: usize,
    pub files: usize,
}

/// Render the whole site into `build.output`.
pub fn build_site(config: &SiteConfig) -> Result<BuildStats> {
    let output = &config.build.output;
    if let Some((message, hint)) = config.build.layout_conflict() {
        bail!("{message} ({}): {hint}", output.display());
    }
    prepare_output(output, config.build.clean)?;

    let collection = Collection::load(&config.build.content, config.build.skip_drafts)?;
    let files = collect_colocated_files(&config.build.content);
    let assets = SiteAssets::from_config(config);

    let progress = ProgressLine::new(&[
        ("posts", collection.len()),
        ("pages", 1),
        ("assets", assets.all().len()),
        ("files", files.len()),
    ]);

    collection.posts().par_iter().try_for_each(|post| {
        let html = render_post_page(post, config, &assets);
        let path = output.join("posts").join(&post.slug).join("index.html");
        write_file(&path, html.as_bytes())?;
        progress.inc("posts");
        Ok::<_, anyhow::Error>(())
    })?;

    write_file(
        &output.join("index.html"),
        render_index_page(&collection, config, &assets).as_bytes(),
    )?;
    progress.inc("pages");

    for asset in assets.all() {
        write_file(&output.join(asset.output_path()), asset.content.as_bytes())?;
        progress.inc("assets");
    }

    files.par_iter().try_for_each(|(source, relative)| {
        let dest = output.join("posts").join(relative);
        copy_file(source, &dest)?;
        progress.inc("files");
        Ok::<_, anyhow::Error>(())
    })?;

    progress.finish();

    let stats = BuildStats {
        posts: collection.len(),
        assets: assets.all().len(),
        files: files.len(),
    };
    if stats.posts == 0 {
        log!("warning"; "no posts found in {}", config.root_relative(&config.build.content).display());
    }
    log!("build"; "done: {}", config.root_relative(output).display());
    Ok(stats)
}

/// Create the output directory, wiping it first with `--clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
        debug!("build"; "cleared {}", output.display());
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Non-markdown files under the content directory, with paths relative to it.
fn collect_colocated_files(content_dir: &Path) -> Vec<(PathBuf, PathBuf)> {
    let mut files: Vec<_> = WalkDir::new(content_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| p.extension().is_none_or(|ext| ext != "md"))
        .filter_map(|p| {
            let relative = p.strip_prefix(content_dir).ok()?.to_path_buf();
            Some((p, relative))
        })
        .collect();
    files.sort();
    files
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(source, dest)
        .map(|_| ())
        .with_context(|| format!("Failed to copy {}", source.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(files: &[(&str, &str)]) -> (TempDir, SiteConfig) {
        let dir = tempfile::tempdir().unwrap();
        for (path, content) in files {
            let path = dir.path().join("content").join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let mut config = SiteConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.content = dir.path().join("content");
        config.build.output = dir.path().join("public");
        (dir, config)
    }

    #[test]
    fn test_build_writes_site() {
        let (_dir, config) = site(&[
            ("hello.md", "---\ntitle: Hello\n---\n## Intro\ntext\n### Detail\n"),
            ("trip/index.md", "no headings here"),
            ("trip/cover.png", "png"),
        ]);

        let stats = build_site(&config).unwrap();
        assert_eq!(
            stats,
            BuildStats {
                posts: 2,
                assets: 2,
                files: 1
            }
        );

        let out = &config.build.output;
        let hello = fs::read_to_string(out.join("posts/hello/index.html")).unwrap();
        assert!(hello.contains("<title>Hello</title>"));
        assert!(hello.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(hello.contains(r##"href="#detail""##));
        assert!(hello.contains("/assets/scrollspy."));

        let trip = fs::read_to_string(out.join("posts/trip/index.html")).unwrap();
        assert!(!trip.contains("scrollspy"));

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"href="/posts/hello/""#));
        assert!(index.contains(r#"href="/posts/trip/""#));

        assert!(out.join("posts/trip/cover.png").is_file());
        let assets: Vec<_> = fs::read_dir(out.join("assets")).unwrap().collect();
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_skip_drafts_and_clean() {
        let (_dir, mut config) = site(&[("a.md", "---\ndraft: true\n---\nx"), ("b.md", "y")]);
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.build.output.join("stale.html"), "old").unwrap();

        config.build.skip_drafts = true;
        config.build.clean = true;
        let stats = build_site(&config).unwrap();

        assert_eq!(stats.posts, 1);
        assert!(!config.build.output.join("stale.html").exists());
        assert!(!config.build.output.join("posts/a").exists());
        assert!(config.build.output.join("posts/b/index.html").is_file());
    }

    #[test]
    fn test_missing_content_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("missing");
        config.build.output = dir.path().join("public");
        assert!(build_site(&config).is_err());
    }

    #[test]
    fn test_clean_refuses_output_above_content() {
        let (dir, mut config) = site(&[("hello.md", "## Intro")]);
        config.build.output = dir.path().to_path_buf();
        config.build.clean = true;

        let err = build_site(&config).unwrap_err();
        assert!(err.to_string().contains("contains the content directory"));
        assert!(config.build.content.join("hello.md").is_file());
    }

    #[test]
    fn test_output_inside_content_rejected() {
        let (_dir, mut config) = site(&[("hello.md", "x"), ("cover.png", "png")]);
        config.build.output = config.build.content.join("public");

        let err = build_site(&config).unwrap_err();
        assert!(err.to_string().contains("inside the content directory"));
        assert!(!config.build.output.exists());
    }

    #[test]
    fn test_rebuild_is_stable() {
        let (_dir, config) = site(&[
            ("hello.md", "## Intro"),
            ("trip/index.md", "text"),
            ("trip/cover.png", "png"),
        ]);

        let first = build_site(&config).unwrap();
        let second = build_site(&config).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.files, 1);
        assert!(config.build.output.join("posts/trip/cover.png").is_file());
        assert!(!config.build.output.join("posts/public").exists());
    }
}
