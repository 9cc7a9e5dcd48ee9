//! Client configuration, read from `~/.idclient/config.yaml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "config.yaml";

/// Facts about the device the client runs on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub is_mobile: bool,
    /// Android 8 and later manage notification sounds per channel
    pub is_android_newer_than_n: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the RPC backend
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Where mobile builds write traces and profiles
    pub pprof_dir: Option<String>,
    pub log_dir: PathBuf,
    pub log_file: String,
    pub platform: Platform,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: String::from("http://127.0.0.1:5222"),
            request_timeout_secs: 30,
            pprof_dir: None,
            log_dir: PathBuf::from("."),
            log_file: String::from("idclient.log"),
            platform: Platform::default(),
        }
    }
}

impl Config {
    /// Directory holding the config file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".idclient")
    }

    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir().join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
