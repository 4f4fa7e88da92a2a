//! Table of contents: heading extraction, nesting, rendering and ScrollSpy.
//!
//! ```text
//! markdown ──► extract_headings() ──► [Heading] ──► build_outline() ──► render_toc()
//!                                        │                                 ▲
//!                                        └──► ScrollSpy ──► ActiveId ──────┘
//! ```
//!
//! | Module      | Purpose                                           |
//! |-------------|---------------------------------------------------|
//! | `slug`      | Heading text → anchor id                          |
//! | `heading`   | Lazy heading iterator over a markdown document    |
//! | `outline`   | Flat heading list → nested outline                |
//! | `render`    | Outline → sidebar HTML                            |
//! | `tracker`   | Visible-heading tracking (scoped observer)        |
//! | `component` | `TableOfContents`, tying the above together       |

mod component;
pub mod heading;
pub mod outline;
mod render;
pub mod slug;
pub mod tracker;

pub use component::TableOfContents;
pub use heading::{Heading, extract_headings, extract_in_range};
pub use outline::{OutlineItem, build_outline};
pub use render::render_toc;
pub use slug::slugify;
pub use tracker::{ActiveId, IntersectionEntry, Observer, ObserverOptions, Rect, ScrollSpy};
