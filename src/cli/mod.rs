//! Command-line interface module.

mod args;
pub mod build;
pub mod params;
pub mod serve;
pub mod toc;

pub use args::{BuildArgs, Cli, Commands, TocArgs};
