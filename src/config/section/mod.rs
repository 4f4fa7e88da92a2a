//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module  | TOML Section | Purpose                                |
//! |---------|--------------|----------------------------------------|
//! | `build` | `[build]`    | Content/output paths, drafts           |
//! | `serve` | `[serve]`    | Development server                     |
//! | `site`  | `[site]`     | Site title, description, url           |
//! | `toc`   | `[toc]`      | Table of contents and ScrollSpy region |

mod build;
mod serve;
mod site;
mod toc;

pub use build::BuildConfig;
pub use serve::ServeConfig;
pub use site::SiteInfoConfig;
pub use toc::TocConfig;
