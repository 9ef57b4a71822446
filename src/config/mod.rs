//! Configuration system for komoplane
//!
//! A single YAML file layered over built-in defaults, with environment
//! variable overrides on top.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, GraphConfig, ServerConfig, UiConfig};

/// Every key accepted by `config get` and `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "server.url",
    "server.timeoutSeconds",
    "ui.enableMouse",
    "ui.noIcons",
    "graph.direction",
    "graph.nodeWidth",
    "graph.nodeHeight",
    "graph.rankSep",
    "graph.nodeSep",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "server.url" => Ok(config.server.url.clone()),
        "server.timeoutSeconds" => Ok(config.server.timeout_seconds.to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        "graph.direction" => Ok(config.graph.direction.to_string()),
        "graph.nodeWidth" => Ok(config.graph.node_width.to_string()),
        "graph.nodeHeight" => Ok(config.graph.node_height.to_string()),
        "graph.rankSep" => Ok(config.graph.rank_sep.to_string()),
        "graph.nodeSep" => Ok(config.graph.node_sep.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "server.url" => {
            url::Url::parse(value).with_context(|| format!("Invalid URL: {}", value))?;
            config.server.url = value.to_string();
        }
        "server.timeoutSeconds" => {
            config.server.timeout_seconds = value
                .parse()
                .context("server.timeoutSeconds must be a number")?;
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        "graph.direction" => {
            config.graph.direction = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        }
        "graph.nodeWidth" => {
            config.graph.node_width = value.parse().context("graph.nodeWidth must be a number")?;
        }
        "graph.nodeHeight" => {
            config.graph.node_height = value
                .parse()
                .context("graph.nodeHeight must be a number")?;
        }
        "graph.rankSep" => {
            config.graph.rank_sep = value.parse().context("graph.rankSep must be a number")?;
        }
        "graph.nodeSep" => {
            config.graph.node_sep = value.parse().context("graph.nodeSep must be a number")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
