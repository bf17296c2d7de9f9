use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the API base URL from the config file
pub const API_BASE_URL_ENV: &str = "COVERLY_API_BASE_URL";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";

/// Application configuration loaded from ~/.config/coverly/config.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Books / Toggl proxy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Image export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported images are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// TrueType/OpenType font used for card text
    pub font_path: Option<PathBuf>,

    /// Upper bound for a single cover download
    #[serde(default = "default_image_timeout_secs")]
    pub image_timeout_secs: u64,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

/// Local persistence settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// SQLite file holding history, cached results and preferences
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_image_timeout_secs() -> u64 {
    15
}

fn default_jpeg_quality() -> u8 {
    90
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            font_path: None,
            image_timeout_secs: default_image_timeout_secs(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        let mut config = Self::load_from(&path)?;

        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let config: Self =
            toml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    /// Reject values that would make every request fail immediately
    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be at least 1");
        }
        if self.export.image_timeout_secs == 0 {
            bail!("export.image_timeout_secs must be at least 1");
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("coverly").join("config.toml"))
    }

    /// Get the store path, with CLI override taking precedence
    pub fn store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override.map(Path::to_path_buf).or_else(|| self.storage.path.clone()) {
            return Ok(path);
        }
        let data_dir = dirs::data_dir().context("Could not determine data directory")?;
        Ok(data_dir.join("coverly").join("coverly.db"))
    }

    /// Get the API base URL, with CLI override taking precedence
    pub fn base_url(&self, cli_override: Option<&str>) -> String {
        cli_override
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.api.base_url.trim_end_matches('/').to_string())
    }

    /// Get the output directory, with CLI override taking precedence
    pub fn output_dir(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.export.output_dir.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.export.image_timeout_secs)
    }
}
