//! Configuration Management
//!
//! Handles persistent configuration storage for tadmin.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const SERVER_URL_ENV: &str = "TADMIN_SERVER_URL";
pub const BIND_ENV: &str = "TADMIN_BIND";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Last used server URL
    #[serde(default)]
    pub server_url: Option<String>,
    /// Address `serve` listens on
    #[serde(default)]
    pub bind_addr: Option<String>,
    /// Rows per table page
    #[serde(default)]
    pub page_size: Option<usize>,
    /// JSON file backing the store; in-memory when unset
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tadmin").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path; missing or unreadable files yield defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective server URL (CLI > env > config > default)
    pub fn effective_server_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| env_var(SERVER_URL_ENV))
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Get effective bind address (CLI > env > config > default)
    pub fn effective_bind_addr(&self, cli: Option<&str>) -> Result<SocketAddr> {
        let raw = cli
            .map(str::to_string)
            .or_else(|| env_var(BIND_ENV))
            .or_else(|| self.bind_addr.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        raw.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", raw, e))
    }

    /// Get effective page size (CLI > config > default)
    pub fn effective_page_size(&self, cli: Option<usize>) -> usize {
        cli.or(self.page_size)
            .unwrap_or(crate::table::DEFAULT_PAGE_SIZE)
            .max(1)
    }

    /// Get effective data file (CLI > config)
    pub fn effective_data_file(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.data_file.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Remember the server URL and save
    pub fn set_server_url(&mut self, url: &str) -> Result<()> {
        if self.server_url.as_deref() == Some(url) {
            return Ok(());
        }
        self.server_url = Some(url.to_string());
        self.save()
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            server_url: Some("http://example.test:9000".to_string()),
            page_size: Some(25),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 5}"#).unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.effective_page_size(None), 5);
        assert_eq!(config.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let config = Config {
            server_url: Some("http://from-file".to_string()),
            bind_addr: Some("0.0.0.0:1".to_string()),
            page_size: Some(20),
            data_file: Some(PathBuf::from("file.json")),
            request_timeout_secs: None,
        };
        assert_eq!(config.effective_server_url(Some("http://cli")), "http://cli");
        assert_eq!(
            config.effective_bind_addr(Some("127.0.0.1:3000")).unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(config.effective_page_size(Some(7)), 7);
        assert_eq!(
            config.effective_data_file(Some(PathBuf::from("cli.json"))),
            Some(PathBuf::from("cli.json"))
        );
        assert_eq!(config.effective_data_file(None), Some(PathBuf::from("file.json")));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let config = Config::default();
        assert!(config.effective_bind_addr(Some("nowhere")).is_err());
    }

    #[test]
    fn test_page_size_never_zero() {
        let config = Config {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(config.effective_page_size(None), 1);
    }
}
