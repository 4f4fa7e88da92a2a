//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Quire markdown blog renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub content: Option<PathBuf>,

    /// Config file path (default: quire.toml)
    #[arg(short = 'C', long, default_value = "quire.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render every post, the index page and assets
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Start a development server that renders on request
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the table of contents of a post
    #[command(visible_alias = "t")]
    Toc {
        #[command(flatten)]
        args: TocArgs,
    },

    /// Print the slug segments of every post as JSON
    #[command(visible_alias = "p")]
    Params {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// Clean output directory completely before building
    #[arg(long)]
    pub clean: bool,

    /// Override site URL (its path becomes the URL prefix)
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Skip draft posts (default: false, drafts are included)
    #[arg(short = 'E', long)]
    pub skip_drafts: bool,
}

/// Toc command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct TocArgs {
    /// Post slug (e.g. `2024/hello`) or a markdown file path
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Print the flat heading list as JSON instead of the outline
    #[arg(short, long)]
    pub json: bool,

    /// Include every heading level, not just the configured range
    #[arg(short, long)]
    pub all_levels: bool,
}

impl Cli {
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
