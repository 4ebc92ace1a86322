//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["bloom.toml", ".bloom.toml", "bloom.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog data.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Presentation settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format from the file name.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON catalog file, relative to the config file's directory.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

/// Output settings. These never change query results, only how many rows
/// are printed and how prices look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Maximum rows printed per listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Currency suffix for prices.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "₸".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            limit: None,
            currency: default_currency(),
        }
    }
}

/// Generate a default bloom.toml config file.
pub fn generate_default_config(catalog_path: &str) -> String {
    format!(
        r#"# Bloom catalog CLI configuration

[catalog]
path = "{catalog_path}"

[output]
# limit = 20
currency = "₸"
"#,
        catalog_path = catalog_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_sections() {
        let config = CliConfig::parse("bloom.toml", "").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.catalog.path, "catalog.json");
        assert_eq!(config.output.currency, "₸");
    }

    #[test]
    fn test_generated_config_parses() {
        let content = generate_default_config("data/catalog.json");
        let config = CliConfig::parse("bloom.toml", &content).unwrap();
        assert_eq!(config.catalog.path, "data/catalog.json");
        assert_eq!(config.output.limit, None);
    }

    #[test]
    fn test_json_config() {
        let content = r#"{"output": {"limit": 5, "currency": "KZT"}}"#;
        let config = CliConfig::parse("bloom.json", content).unwrap();
        assert_eq!(config.output.limit, Some(5));
        assert_eq!(config.output.currency, "KZT");
        assert_eq!(config.catalog.path, "catalog.json");
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(CliConfig::parse("bloom.toml", "[catalog\npath =").is_err());
    }
}
