//! `[toc]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [toc]
//! enable = true
//! title = "On this page"
//! min_level = 2               # Shallowest heading in the ToC
//! max_level = 4               # Deepest heading in the ToC
//! root_margin_bottom = 0.6    # Bottom share of the viewport ignored by ScrollSpy
//! threshold = 0.1             # Visible share of a heading that counts as "in view"
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::toc::ObserverOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Render the ToC sidebar.
    pub enable: bool,

    /// Sidebar heading.
    pub title: String,

    pub min_level: u8,

    pub max_level: u8,

    pub root_margin_bottom: f32,

    pub threshold: f32,
}

impl Default for TocConfig {
    fn default() -> Self {
        let observer = ObserverOptions::default();
        Self {
            enable: true,
            title: "On this page".into(),
            min_level: 2,
            max_level: 4,
            root_margin_bottom: observer.root_margin_bottom,
            threshold: observer.threshold,
        }
    }
}

impl TocConfig {
    /// Heading levels that take part in the ToC and are observed.
    pub fn levels(&self) -> RangeInclusive<u8> {
        self.min_level..=self.max_level
    }

    pub fn observer_options(&self) -> ObserverOptions {
        ObserverOptions {
            root_margin_bottom: self.root_margin_bottom,
            threshold: self.threshold,
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, level) in [
            (FieldPath::new("toc.min_level"), self.min_level),
            (FieldPath::new("toc.max_level"), self.max_level),
        ] {
            if !(1..=6).contains(&level) {
                diag.error(field, format!("heading level must be 1-6, got {level}"));
            }
        }
        if self.min_level > self.max_level {
            diag.error_with_hint(
                FieldPath::new("toc.min_level"),
                format!(
                    "min_level ({}) is greater than max_level ({})",
                    self.min_level, self.max_level
                ),
                "swap the values",
            );
        }
        for (field, value) in [
            (FieldPath::new("toc.root_margin_bottom"), self.root_margin_bottom),
            (FieldPath::new("toc.threshold"), self.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                diag.error(field, format!("must be between 0 and 1, got {value}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.toc.enable);
        assert_eq!(config.toc.title, "On this page");
        assert_eq!(config.toc.levels(), 2..=4);
        assert_eq!(config.toc.observer_options().root_margin_bottom, 0.6);
        assert_eq!(config.toc.observer_options().threshold, 0.1);
    }

    #[test]
    fn test_override() {
        let config = test_parse_config("[toc]\nmin_level = 1\nmax_level = 3\ntitle = \"Contents\"");
        assert_eq!(config.toc.levels(), 1..=3);
        assert_eq!(config.toc.title, "Contents");
    }

    #[test]
    fn test_validate_defaults_ok() {
        let config = test_parse_config("");
        let mut diag = ConfigDiagnostics::new();
        config.toc.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let config = test_parse_config(
            "[toc]\nmin_level = 5\nmax_level = 7\nthreshold = 1.5\nroot_margin_bottom = -0.1",
        );
        let mut diag = ConfigDiagnostics::new();
        config.toc.validate(&mut diag);
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["toc.max_level", "toc.root_margin_bottom", "toc.threshold"]
        );
    }

    #[test]
    fn test_validate_inverted_range() {
        let config = test_parse_config("[toc]\nmin_level = 4\nmax_level = 2");
        let mut diag = ConfigDiagnostics::new();
        config.toc.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert!(diag.errors()[0].hint.is_some());
    }
}
