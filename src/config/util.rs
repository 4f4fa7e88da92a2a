//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Path component of a site URL without surrounding slashes.
///
/// `https://example.com:8080/blog/?q#x` gives `blog`; a bare host gives an
/// empty string. `None` when the URL does not parse.
pub fn extract_url_path(url_str: &str) -> Option<String> {
    url::Url::parse(url_str)
        .ok()
        .map(|url| url.path().trim_matches('/').to_owned())
}

/// Nearest `config_name` in cwd or one of its ancestors, so `quire` works
/// from inside `content/2024/`. An absolute `config_name` is only checked
/// for existence.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}
