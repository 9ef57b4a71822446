//! Where the configuration file lives
//!
//! `KOMOPLANE_CONFIG_DIR` wins when set. Otherwise the platform location
//! is used: `$XDG_CONFIG_HOME/komoplane` or `~/.config/komoplane` on Unix,
//! the roaming AppData folder on Windows.

use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "KOMOPLANE_CONFIG_DIR";

const APP_NAME: &str = "komoplane";
const CONFIG_FILE: &str = "config.yaml";

#[cfg(windows)]
fn platform_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(not(windows))]
fn platform_config_dir() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => directories::BaseDirs::new()?.home_dir().join(".config"),
    };
    Some(base.join(APP_NAME))
}

/// Directory holding `config.yaml`
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    platform_config_dir().unwrap_or_else(|| {
        tracing::debug!("No home directory found, using ./.config/{}", APP_NAME);
        PathBuf::from(".config").join(APP_NAME)
    })
}

/// Full path of the configuration file
pub fn root_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Create `path` and its parents when missing
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_name() {
        assert!(root_config_path().ends_with(CONFIG_FILE));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
