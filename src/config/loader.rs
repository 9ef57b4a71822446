//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. `--url` on the command line (applied by the caller)
//! 2. Environment variable overrides
//! 3. Config file
//! 4. Built-in defaults

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Backend URL override
pub const URL_ENV: &str = "KOMOPLANE_URL";
/// Request timeout override, in seconds
pub const TIMEOUT_ENV: &str = "KOMOPLANE_TIMEOUT";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the root config file with environment overrides applied
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load `path` if present, defaults otherwise, then apply env overrides
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };
        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file
    ///
    /// Fails on invalid YAML, wrong value types or out-of-range values.
    /// A missing file is valid.
    pub fn validate() -> Result<()> {
        let path = paths::root_config_path();
        if !path.exists() {
            return Ok(());
        }
        let config = Self::load_file(&path)?;
        Self::check(&config)
    }

    /// Semantic checks serde cannot express
    pub fn check(config: &Config) -> Result<()> {
        url::Url::parse(&config.server.url)
            .with_context(|| format!("server.url is not a valid URL: {}", config.server.url))?;

        if config.server.timeout_seconds == 0 {
            anyhow::bail!("server.timeoutSeconds must be greater than 0");
        }

        let graph = &config.graph;
        for (key, value) in [
            ("graph.nodeWidth", graph.node_width),
            ("graph.nodeHeight", graph.node_height),
        ] {
            if value.is_nan() || value <= 0.0 {
                anyhow::bail!("{} must be greater than 0, got {}", key, value);
            }
        }
        for (key, value) in [
            ("graph.rankSep", graph.rank_sep),
            ("graph.nodeSep", graph.node_sep),
        ] {
            if value.is_nan() || value < 0.0 {
                anyhow::bail!("{} must not be negative, got {}", key, value);
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(url) = std::env::var(URL_ENV) {
            config.server.url = url;
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            match timeout.parse::<u64>() {
                Ok(secs) => config.server.timeout_seconds = secs,
                Err(_) => tracing::warn!("Ignoring invalid {}={}", TIMEOUT_ENV, timeout),
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_from(&tmp.path().join("config.yaml")).unwrap();
        assert_eq!(config.graph, Config::default().graph);
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.ui.no_icons = true;
        config.graph.node_width = 240.0;
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert!(loaded.ui.no_icons);
        assert_eq!(loaded.graph.node_width, 240.0);
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "server: [not, a, map").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_check_rejects_bad_values() {
        let mut config = Config::default();
        assert!(ConfigLoader::check(&config).is_ok());

        config.server.timeout_seconds = 0;
        assert!(ConfigLoader::check(&config).is_err());

        let mut config = Config::default();
        config.server.url = "not a url".to_string();
        assert!(ConfigLoader::check(&config).is_err());

        let mut config = Config::default();
        config.graph.node_height = 0.0;
        assert!(ConfigLoader::check(&config).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads these variables.
        unsafe {
            std::env::set_var(URL_ENV, "http://override:9000");
            std::env::set_var(TIMEOUT_ENV, "3");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.server.url, "http://override:9000");
        assert_eq!(config.server.timeout_seconds, 3);

        // SAFETY: see above.
        unsafe {
            std::env::remove_var(URL_ENV);
            std::env::remove_var(TIMEOUT_ENV);
        }
    }
}
