//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use bloom_catalog::prelude::{Catalog, CatalogSnapshot};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    catalog_override: Option<String>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        catalog: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_file {
            tracing::debug!(path = %path.display(), "using config file");
        }

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
            catalog_override: catalog,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Catalog file to load: `--catalog` relative to the working directory,
    /// otherwise the configured path relative to the config file.
    pub fn catalog_path(&self) -> PathBuf {
        if let Some(path) = &self.catalog_override {
            return self.resolve_path(path);
        }

        let path = Path::new(&self.config.catalog.path);
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_file.as_deref().and_then(Path::parent) {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(path),
            _ => self.cwd.join(path),
        }
    }

    /// Load the catalog snapshot and wrap it in a query facade.
    pub fn catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        let snapshot = CatalogSnapshot::load(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        Ok(Catalog::new(Arc::new(snapshot)))
    }

    /// Truncate a listing to the configured row limit.
    pub fn limited<T>(&self, mut rows: Vec<T>) -> Vec<T> {
        if let Some(limit) = self.config.output.limit {
            rows.truncate(limit);
        }
        rows
    }

    /// Format a price with the configured currency.
    pub fn price(&self, amount: i64) -> String {
        crate::output::format_price(amount, &self.config.output.currency)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config_file: Option<&str>, catalog: Option<&str>) -> Context {
        Context {
            config: CliConfig::default(),
            config_file: config_file.map(PathBuf::from),
            output: Output::new(false, true),
            cwd: PathBuf::from("/work"),
            catalog_override: catalog.map(str::to_string),
        }
    }

    #[test]
    fn test_catalog_path_resolution() {
        assert_eq!(context(None, None).catalog_path(), PathBuf::from("/work/catalog.json"));
        assert_eq!(
            context(Some("/etc/bloom/bloom.toml"), None).catalog_path(),
            PathBuf::from("/etc/bloom/catalog.json")
        );
        assert_eq!(
            context(Some("/etc/bloom/bloom.toml"), Some("data/c.json")).catalog_path(),
            PathBuf::from("/work/data/c.json")
        );
    }

    #[test]
    fn test_limit() {
        let mut ctx = context(None, None);
        assert_eq!(ctx.limited(vec![1, 2, 3]).len(), 3);
        ctx.config.output.limit = Some(2);
        assert_eq!(ctx.limited(vec![1, 2, 3]), vec![1, 2]);
    }
}
