//! Post metadata from `---` (YAML-like) or `+++` (TOML) frontmatter.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Post frontmatter.
///
/// | Field         | Type          | Description                     |
/// |---------------|---------------|---------------------------------|
/// | `title`       | `String`      | Post title                      |
/// | `description` | `String`      | One-line summary (`summary` too)|
/// | `date`        | `String`      | Publication date                |
/// | `author`      | `String`      | Author name                     |
/// | `draft`       | `bool`        | Draft status (default: false)   |
/// | `tags`        | `Vec<String>` | Categorization tags             |
///
/// Any other key is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMeta {
    pub title: Option<String>,
    #[serde(alias = "summary")]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: Option<String>,
    pub author: Option<String>,
    pub draft: bool,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept both `date = "2024-01-01"` and a bare TOML date `date = 2024-01-01`.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<toml::Value> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        toml::Value::String(s) => s,
        other => other.to_string(),
    }))
}

/// Treat `null` tags as empty.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Frontmatter splitter and parser.
pub struct FrontmatterExtractor;

impl FrontmatterExtractor {
    /// Split `content` into metadata and body.
    ///
    /// Without frontmatter the metadata is empty and the body is the whole
    /// input. Only TOML frontmatter can fail; the YAML-like form is read line
    /// by line and never errors.
    pub fn extract(content: &str) -> Result<(PostMeta, &str), toml::de::Error> {
        match Self::detect(content) {
            Some((fm, body, true)) => Ok((toml::from_str(fm)?, body)),
            Some((fm, body, false)) => Ok((Self::parse_yaml_like(fm), body)),
            None => Ok((PostMeta::default(), content)),
        }
    }

    /// Returns `(frontmatter, body, is_toml)` if the content opens with a fence.
    fn detect(content: &str) -> Option<(&str, &str, bool)> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        for (fence, is_toml) in [("---", false), ("+++", true)] {
            let Some(rest) = trimmed.strip_prefix(fence) else {
                continue;
            };
            let closing = format!("\n{fence}");
            if let Some(end) = rest.find(&closing) {
                let fm = rest[..end].trim();
                let after = &rest[end + closing.len()..];
                // rest of the closing fence line
                let body = after.split_once('\n').map_or("", |(_, body)| body);
                return Some((fm, body.trim_start_matches('\n'), is_toml));
            }
        }
        None
    }

    /// `key: value` lines. Known keys fill the typed fields, the rest go to
    /// `extra` with the original key case.
    fn parse_yaml_like(content: &str) -> PostMeta {
        let mut meta = PostMeta::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let value = unquote(value.trim());

            match key.trim().to_lowercase().as_str() {
                "title" => meta.title = Some(value.to_owned()),
                "description" | "summary" => meta.description = Some(value.to_owned()),
                "date" => meta.date = Some(value.to_owned()),
                "author" => meta.author = Some(value.to_owned()),
                "draft" => meta.draft = value.eq_ignore_ascii_case("true"),
                "tags" => meta.tags = split_list(value).map(str::to_owned).collect(),
                _ => {
                    meta.extra.insert(key.trim().to_owned(), parse_yaml_value(value));
                }
            }
        }

        meta
    }
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// `a, b` or `[a, b]`.
fn split_list(s: &str) -> impl Iterator<Item = &str> {
    let s = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(s);
    s.split(',').map(|item| unquote(item.trim())).filter(|item| !item.is_empty())
}

/// Booleans, null, numbers and comma lists; strings otherwise.
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" {
        return Value::Null;
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }
    if s.contains(',') || (s.starts_with('[') && s.ends_with(']')) {
        return Value::Array(split_list(s).map(|item| Value::String(item.to_owned())).collect());
    }
    Value::String(s.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: a, b\n---\n\n# Body";
        let (meta, body) = FrontmatterExtractor::extract(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_quoted_values() {
        let content = "---\ntitle: \"Rust: a tour\"\ndescription: 'short'\ntags: [x, \"y\"]\ndraft: true\n---\nbody";
        let (meta, body) = FrontmatterExtractor::extract(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Rust: a tour"));
        assert_eq!(meta.description.as_deref(), Some("short"));
        assert_eq!(meta.tags, vec!["x", "y"]);
        assert!(meta.draft);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\nsummary = \"Intro\"\ndate = 2024-03-05\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = FrontmatterExtractor::extract(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.description.as_deref(), Some("Intro"));
        assert_eq!(meta.date.as_deref(), Some("2024-03-05"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let content = "+++\ntitle = \n+++\nbody";
        assert!(FrontmatterExtractor::extract(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just content";
        let (meta, body) = FrontmatterExtractor::extract(content).unwrap();
        assert_eq!(meta, PostMeta::default());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_fence_is_body() {
        let content = "---\ntitle: Hello\n\n## Section";
        let (meta, body) = FrontmatterExtractor::extract(content).unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content = "---\ntitle: Hello\nCustom: world\ncount: 42\nflag: true\nitems: x, y, z\n---\n";
        let (meta, _) = FrontmatterExtractor::extract(content).unwrap();

        assert_eq!(meta.extra.get("Custom"), Some(&json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&json!(true)));
        assert_eq!(meta.extra.get("items"), Some(&json!(["x", "y", "z"])));
    }

    #[test]
    fn test_toml_extra_fields() {
        let content = "+++\ntitle = \"Hello\"\ncustom = \"world\"\ncount = 42\n+++\n";
        let (meta, _) = FrontmatterExtractor::extract(content).unwrap();

        assert_eq!(meta.extra.get("custom"), Some(&json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&json!(42)));
    }
}
