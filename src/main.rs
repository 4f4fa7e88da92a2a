//! Quire - a markdown blog renderer with a scroll-tracking table of contents.

#![allow(dead_code)]

mod cli;
mod config;
mod content;
mod core;
mod embed;
mod logger;
mod markdown;
mod render;
mod toc;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{SiteConfig, init_config};

fn main() -> Result<()> {
    // Before any blocking operation
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }

    let config = init_config(SiteConfig::load(&cli)?);

    match &cli.command {
        Commands::Build { .. } => cli::build::build_site(&config).map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve_site(),
        Commands::Toc { args } => cli::toc::run_toc(args, &config),
        Commands::Params { pretty } => cli::params::run_params(*pretty, &config),
    }
}
