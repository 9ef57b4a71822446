//! Configuration schema definitions
//!
//! Defines the structure of the configuration file using serde for serialization.

use crate::graph::{LayoutConfig, LayoutDirection};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub server: ServerConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,

    /// Graph layout used by `komoplane graph`
    #[serde(default)]
    pub graph: GraphConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Base URL of the komoplane backend
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default)]
    pub enable_mouse: bool,

    /// Disable Unicode icons for compatibility
    #[serde(default)]
    pub no_icons: bool,
}

/// Layout settings for exported graphs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    #[serde(default)]
    pub direction: LayoutDirection,

    #[serde(default = "default_node_width")]
    pub node_width: f64,

    #[serde(default = "default_node_height")]
    pub node_height: f64,

    #[serde(default = "default_sep")]
    pub rank_sep: f64,

    #[serde(default = "default_sep")]
    pub node_sep: f64,
}

fn default_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_node_width() -> f64 {
    300.0
}

fn default_node_height() -> f64 {
    50.0
}

fn default_sep() -> f64 {
    50.0
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            direction: LayoutDirection::default(),
            node_width: default_node_width(),
            node_height: default_node_height(),
            rank_sep: default_sep(),
            node_sep: default_sep(),
        }
    }
}

impl GraphConfig {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            direction: self.direction,
            node_width: self.node_width,
            node_height: self.node_height,
            rank_sep: self.rank_sep,
            node_sep: self.node_sep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.url, "http://localhost:8090");
        assert_eq!(config.server.timeout_seconds, 10);
        assert_eq!(config.graph.direction, LayoutDirection::RightToLeft);
        assert_eq!(config.graph.layout_config(), LayoutConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("timeoutSeconds"));
        assert!(yaml.contains("direction: RL"));
    }

    #[test]
    fn test_partial_config_deserialization() {
        let yaml = r#"
server:
  url: http://komoplane.example:8090
graph:
  direction: TB
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.url, "http://komoplane.example:8090");
        assert_eq!(config.server.timeout_seconds, 10);
        assert_eq!(config.graph.direction, LayoutDirection::TopToBottom);
        assert_eq!(config.graph.node_width, 300.0);
        assert!(!config.ui.enable_mouse);
    }
}
