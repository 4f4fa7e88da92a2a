//! Site configuration management for `quire.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── serve      # [serve]
//! │   ├── site       # [site]
//! │   └── toc        # [toc]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Global config handle
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                        |
//! |-----------|------------------------------------------------|
//! | `[site]`  | Site metadata (title, description, author, url)|
//! | `[build]` | Content and output paths, drafts               |
//! | `[toc]`   | Table of contents levels, title, scroll spy    |
//! | `[serve]` | Development server (interface, port)           |

pub mod section;
pub mod types;
mod util;

use util::{extract_url_path, find_config_file};

pub use section::{BuildConfig, ServeConfig, SiteInfoConfig, TocConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, cfg, init_config};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Parsed `quire.toml` with paths resolved against the site root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Where the config was (or would have been) read from.
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file. Relative paths resolve here.
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteInfoConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub toc: TocConfig,

    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Find, parse, finalize and validate the config for `cli`.
    ///
    /// A missing config file is not an error: defaults apply and cwd is the
    /// site root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                log!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve paths and fold CLI overrides in.
    fn finalize(&mut self, cli: &Cli) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.normalize_paths(cli, &root);
        self.apply_command_options(cli);
        self.sync_path_prefix_from_url();

        // The dev server always serves from `/`
        if cli.is_serve() {
            self.build.path_prefix.clear();
        }
    }

    /// Derive `build.path_prefix` from `site.url`.
    fn sync_path_prefix_from_url(&mut self) {
        if let Some(ref url) = self.site.url
            && let Some(path) = extract_url_path(url)
        {
            self.build.path_prefix = path;
        }
    }

    /// Read and parse `path`, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            warn_unknown_fields(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML, returning the dotted paths of fields nothing consumed.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// `path` relative to the site root, for log output.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
            Commands::Toc { .. } | Commands::Params { .. } => {}
        }
    }

    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        self.build.clean = args.clean;
        self.build.skip_drafts |= args.skip_drafts;

        if let Some(ref url) = args.site_url {
            self.site.url = Some(url.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        self.root = normalize_path(root);
        self.config_path = normalize_path(&self.config_path);
        self.build.content = normalize_path(&self.root.join(&self.build.content));
        self.build.output = normalize_path(&self.root.join(&self.build.output));
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration, collecting every error before returning.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.build.validate(&mut diag);
        self.toc.validate(&mut diag);
        self.serve.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Unknown fields are ignored, not fatal.
fn warn_unknown_fields(fields: &[String], path: &Path) {
    let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
    log!("warning"; "{} has unknown fields: {}", name, fields.join(", "));
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leak_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::parse_from(args)))
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = SiteConfig::parse_with_ignored("[base\ntitle = \"My Blog\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();

        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.site.title, "");
        assert_eq!(config.toc.min_level, 2);
        assert_eq!(config.serve.port, 5277);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[site]\ntitle = \"Test\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_unknown_nested_field_detected() {
        let content = "[toc]\nmax_depth = 3";
        let (_, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
        assert_eq!(ignored, vec!["toc.max_depth".to_string()]);
    }

    #[test]
    fn test_finalize_normalizes_and_applies_cli() {
        let dir = tempfile::tempdir().unwrap();
        let cli = leak_cli(&["quire", "-c", "posts", "build", "--clean", "-U", "https://example.com/blog/"]);

        let mut config = test_parse_config("[build]\noutput = \"dist\"");
        config.config_path = dir.path().join("quire.toml");
        config.finalize(cli);

        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.build.content, root.join("posts"));
        assert_eq!(config.build.output, root.join("dist"));
        assert!(config.build.clean);
        assert_eq!(config.site.url.as_deref(), Some("https://example.com/blog/"));
        assert_eq!(config.build.path_prefix, "blog");
    }

    #[test]
    fn test_serve_overrides_and_clears_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let cli = leak_cli(&["quire", "serve", "--port", "9000"]);

        let mut config = test_parse_config("[site]\nurl = \"https://example.com/blog\"");
        config.config_path = dir.path().join("quire.toml");
        config.finalize(cli);

        assert_eq!(config.serve.port, 9000);
        assert!(config.build.path_prefix.is_empty());
    }

    #[test]
    fn test_validate_collects_every_section() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_parse_config(
            "[site]\nurl = \"nope\"\n[toc]\nmin_level = 5\nmax_level = 3",
        );
        config.build.content = dir.path().join("missing");
        config.build.output = dir.path().join("public");

        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        let fields: Vec<_> = diag.errors().iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, ["site.url", "build.content", "toc.min_level"]);
    }
}
