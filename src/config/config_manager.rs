use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, TOKEN_FILE_NAME};
use crate::errors::{PortalError, PortalResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    pub fn load() -> PortalResult<Config> {
        let mut config = Self::load_from(&Self::config_path())?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                log::debug!("Using API base URL from {}", API_URL_ENV);
                config.api.base_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> PortalResult<Config> {
        if path.exists() {
            log::debug!("📋 Loading config from: {}", path.display());
            let content = fs::read_to_string(path).map_err(|e| {
                PortalError::config_error(&format!("cannot read {}: {}", path.display(), e), None)
            })?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }

        Ok(Config::default())
    }

    pub fn token_file_path(config: &Config) -> PathBuf {
        match &config.storage.token_file {
            Some(path) => PathBuf::from(path),
            None => Self::config_dir().join(TOKEN_FILE_NAME),
        }
    }

    pub fn create_sample_config() -> PortalResult<PathBuf> {
        let sample_config = r#"# GPU Lab portal client configuration

[api]
# Base URL of the portal REST API (overridden by GPULAB_API_URL)
base_url = "http://localhost:8080"

# Per-request timeout
timeout_secs = 15

[storage]
# Where access/refresh tokens are kept between runs
# token_file = "/home/user/gpulab/tokens.json"

[display]
# newest, oldest, id or status
default_sort = "newest"
page_size = 20
"#;
        let dir = Self::config_dir();
        let path = Self::config_path();
        fs::create_dir_all(&dir)
            .map_err(|e| PortalError::storage(&dir.display().to_string(), &e.to_string()))?;
        fs::write(&path, sample_config)
            .map_err(|e| PortalError::storage(&path.display().to_string(), &e.to_string()))?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match reqwest::Url::parse(&config.api.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(format!("Unsupported base_url scheme: {}", url.scheme())),
            Err(e) => errors.push(format!("Invalid base_url '{}': {}", config.api.base_url, e)),
        }

        if config.api.timeout_secs == 0 {
            errors.push("timeout_secs must be greater than 0".to_string());
        }

        if config.display.page_size == 0 {
            errors.push("page_size must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
