//! HTML rendering: article bodies and full pages.

mod article;
mod page;

pub use article::render_article;
pub use page::{PageMetadata, page_metadata, render_index_page, render_post_page};
