use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub watcher3: Watcher3Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// Number of tokio worker threads (default: 0)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            worker_threads: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,

    pub port: u16,

    /// File descriptor that receives a single newline once the listener is bound.
    pub ready_fd: Option<i32>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 8080,
            ready_fd: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Watcher3Config {
    pub host: String,

    pub port: u16,

    pub scheme: String,

    pub apikey: String,

    /// CA bundle used to verify the Watcher3 certificate. Takes precedence over `ssl_verify`.
    pub ssl_cert: Option<PathBuf>,

    pub ssl_verify: bool,

    pub request_timeout_seconds: u64,

    /// ISO 3166-1 country used for release dates and certification.
    /// When unset, the first production country of the movie is used.
    pub release_country: Option<String>,
}

impl Default for Watcher3Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 80,
            scheme: "http".to_string(),
            apikey: String::new(),
            ssl_cert: None,
            ssl_verify: true,
            request_timeout_seconds: 30,
            release_country: None,
        }
    }
}

impl Watcher3Config {
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/api", self.scheme, self.host, self.port)
    }

    #[must_use]
    pub fn host_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("watcharr").join("config.toml"));
        }

        paths.push(PathBuf::from("/etc/watcharr/config.toml"));
        paths.push(PathBuf::from("/conf/config.toml"));

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
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.watcher3.host.is_empty() {
            anyhow::bail!("Watcher3 host cannot be empty");
        }

        if !matches!(self.watcher3.scheme.as_str(), "http" | "https") {
            anyhow::bail!(
                "Watcher3 scheme must be http or https, got '{}'",
                self.watcher3.scheme
            );
        }

        Ok(())
    }
}
