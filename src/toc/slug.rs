//! Anchor slugification for heading ids.
//!
//! Both the heading extractor and the article renderer call [`slugify`], so
//! every ToC link resolves to an anchor that actually exists in the page.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of whitespace (Unicode `\s`).
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Anything that is not an ASCII word character or a hyphen.
static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").unwrap());

/// Convert heading text into an in-page anchor id.
///
/// Steps, in order:
/// 1. lowercase
/// 2. whitespace runs become a single `-`
/// 3. drop characters outside `[A-Za-z0-9_-]`
/// 4. trim leading/trailing `-`
///
/// Ids are not deduplicated: two headings with the same text share an id.
///
/// # Example
/// ```ignore
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  -- Setup --  "), "setup");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let dashed = RE_WHITESPACE.replace_all(&lower, "-");
    let stripped = RE_NON_WORD.replace_all(&dashed, "");
    stripped.trim_matches('-').to_string()
}

/// Check whether `id` has the shape produced by [`slugify`].
pub fn is_valid_anchor(id: &str) -> bool {
    !id.starts_with('-')
        && !id.ends_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
