use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{APP_NAME, client, query};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub client: ClientConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    pub log_format: LogFormat,

    /// Tokio worker threads; 0 means one per CPU core.
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// JSON array of episodes loaded into the store at startup.
    /// When unset the bundled catalog is used.
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            cors_allowed_origins: vec!["*".to_string()],
            seed_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,

    pub page_size: u32,

    pub request_timeout_seconds: u64,

    /// Where the watched override map is persisted.
    /// Defaults to the platform data directory.
    pub overrides_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: client::DEFAULT_BACKEND_URL.to_string(),
            page_size: client::DEFAULT_PAGE_SIZE,
            request_timeout_seconds: client::REQUEST_TIMEOUT.as_secs(),
            overrides_path: None,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `PORT` and
    /// `BACKEND_URL` from the environment (including a `.env` file).
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_from_disk()?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_from_disk() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!(path = %path.display(), "Loading config");
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?;

        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(url) = lookup("BACKEND_URL") {
            self.client.backend_url = url;
        }

        Ok(())
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!(path = %path.display(), "Wrote config");
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(Self::default_config_path());

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(APP_NAME).join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{APP_NAME}")).join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(query::MIN_PAGE_SIZE..=query::MAX_PAGE_SIZE).contains(&self.client.page_size) {
            anyhow::bail!(
                "client.page_size must be between {} and {}",
                query::MIN_PAGE_SIZE,
                query::MAX_PAGE_SIZE
            );
        }

        if self.client.request_timeout_seconds == 0 {
            anyhow::bail!("client.request_timeout_seconds must be > 0");
        }

        url::Url::parse(&self.client.backend_url)
            .with_context(|| format!("Invalid backend URL: {}", self.client.backend_url))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.client.page_size, 8);
        assert_eq!(config.client.backend_url, "http://localhost:4000");
        assert_eq!(config.general.log_format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[client]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"
            log_format = "json"

            [client]
            page_size = 25
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.log_format, LogFormat::Json);
        assert_eq!(config.client.page_size, 25);

        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| match key {
                "PORT" => Some("8081".to_string()),
                "BACKEND_URL" => Some("http://10.0.2.2:8081".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.client.backend_url, "http://10.0.2.2:8081");

        let err = config
            .apply_env_overrides(|key| (key == "PORT").then(|| "not-a-port".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid PORT value"));
    }

    #[test]
    fn test_validate_rejects_bad_client_settings() {
        let mut config = Config::default();
        config.client.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.client.request_timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.client.backend_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }
}
