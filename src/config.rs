use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DroneError, Result};

/// Configuration file structure for dronectl.
///
/// Holds the Drone server address and credential so they need not be passed
/// on every invocation. Command-line flags and environment variables take
/// precedence over anything loaded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Drone server connection settings
    #[serde(default)]
    pub drone: DroneConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DroneConfig {
    /// Base URL of the Drone API (e.g., 'https://drone.example.com/api')
    pub server: Option<String>,

    /// Personal access token
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overrides the User-Agent header
    pub user_agent: Option<String>,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            server: None,
            token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl DroneConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the server URL, or a configuration error when unset.
    pub fn require_server(&self) -> Result<&str> {
        self.server
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| {
                DroneError::Config(
                    "Drone server URL is not set (use --server or DRONE_SERVER)".to_string(),
                )
            })
    }

    /// Returns the token, or a configuration error when unset.
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                DroneError::Config(
                    "Drone token is not set (use --token or DRONE_TOKEN)".to_string(),
                )
            })
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./dronectl.toml
    /// 3. ./dronectl.json
    /// 4. ./dronectl.yaml
    /// 5. ./dronectl.yml
    /// 6. `<config dir>/dronectl/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(DroneError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_path(path);
        }

        let candidates = ["dronectl.toml", "dronectl.json", "dronectl.yaml", "dronectl.yml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load_from_path(path);
            }
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::load_from_path(&path);
            }
        }

        Ok(Self::default())
    }

    /// Platform-specific per-user config file location.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dronectl").join("config.toml"))
    }

    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        let parsed: std::result::Result<Self, String> = match extension {
            "toml" => toml::from_str(&contents).map_err(|e| e.to_string()),
            "json" => serde_json::from_str(&contents).map_err(|e| e.to_string()),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .map_err(|e| e.to_string()),
        };

        parsed.map_err(|e| {
            DroneError::Config(format!("Failed to parse config {}: {e}", path.display()))
        })
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)
                .map_err(|e| DroneError::Config(format!("Failed to encode YAML: {e}")))?,
            _ => toml::to_string_pretty(self)
                .map_err(|e| DroneError::Config(format!("Failed to encode TOML: {e}")))?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }
}
