use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application configuration, loaded from a TOML file with every field
/// optional. CLI flags override file values in `main`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the sentiment analysis backend.
    pub server_url: String,
    /// Maximum number of history items to request (server caps at 100).
    pub history_limit: usize,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Auto-refresh interval for the dashboard in seconds; 0 disables it.
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            history_limit: 50,
            request_timeout_secs: 10,
            refresh_interval_secs: 0,
        }
    }
}

impl Config {
    /// Load configuration. An explicitly given path must exist; the default
    /// path (`~/.config/sentui/config.toml`) is optional and silently falls
    /// back to defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path)
                    .with_context(|| format!("failed to load config from {}", path.display())),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sentui").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:5000");
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.refresh_interval_secs, 0);
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
            server_url = "http://192.168.1.20:5000"
            history_limit = 25
            request_timeout_secs = 5
            refresh_interval_secs = 60
            "#,
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server_url, "http://192.168.1.20:5000");
        assert_eq!(config.history_limit, 25);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "history_limit = 10\n");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.history_limit, 10);
        assert_eq!(config.server_url, "http://localhost:5000");
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "server_url = [not toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
