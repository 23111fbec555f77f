//! Build configuration.
//!
//! Every field has a default, so an empty document (or no file at all) gives
//! the stock pipeline:
//!
//! ```yaml
//! tiers: [primitives, semantic, theme]
//! units:
//!   rem_prefixes: [spacing-, text-xs, text-sm, text-base, text-lg,
//!                  text-xl, text-2xl, text-3xl, text-4xl]
//!   unitless_prefixes: [leading-]
//!   root_font_size: 16
//! header: "/*! lookbook */"
//! media:
//!   output_name: "[name]-[query].[ext]"
//!   queries:
//!     "screen and (min-width: 768px)": tablet
//! ```
//!
//! `header` and `media` are off unless present.

use serde::{Deserialize, Serialize};

use crate::css::MediaOptions;
use crate::error::Error;
use crate::transform::UnitRules;

/// Collections emitted into the stylesheet, in output order.
pub const DEFAULT_TIERS: &[&str] = &["primitives", "semantic", "theme"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tiers: Vec<String>,
    pub units: UnitRules,
    pub header: Option<String>,
    pub media: Option<MediaOptions>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tiers: DEFAULT_TIERS.iter().map(|t| t.to_string()).collect(),
            units: UnitRules::default(),
            header: None,
            media: None,
        }
    }
}

impl Config {
    /// Parses a YAML configuration. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_units_keep_other_defaults() {
        let config = Config::from_yaml("units:\n  root_font_size: 10\n").unwrap();
        assert_eq!(config.units.root_font_size, 10.0);
        assert_eq!(config.units.unitless_prefixes, vec!["leading-".to_string()]);
        assert_eq!(config.tiers, vec!["primitives", "semantic", "theme"]);
    }

    #[test]
    fn test_media_section() {
        let yaml = "\
header: '/*! v1 */'
media:
  whitelist: true
  queries:
    'print': paper
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.header.as_deref(), Some("/*! v1 */"));

        let media = config.media.unwrap();
        assert!(media.whitelist);
        assert!(media.combine);
        assert_eq!(media.queries.get("print").map(String::as_str), Some("paper"));
    }

    #[test]
    fn test_zero_root_font_size_is_rejected() {
        let err = Config::from_yaml("units:\n  root_font_size: 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("root_font_size must be a positive number"));
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Config::from_yaml("tiers: 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
