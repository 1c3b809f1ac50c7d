// File: ./src/config.rs
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://api.saralpatro.com/graphql";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub max_concurrency: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_concurrency: crate::batch::DEFAULT_CONCURRENCY,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        // ISOLATION: Check env var first
        if let Ok(test_dir) = env::var("PATRO_TEST_DIR") {
            let path = PathBuf::from(test_dir);
            if !path.exists() {
                let _ = fs::create_dir_all(&path);
            }
            return Some(path.join("config.toml"));
        }

        if let Some(proj) = ProjectDirs::from("com", "patro", "patro") {
            let config_dir = proj.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            return Some(config_dir.join("config.toml"));
        }
        None
    }

    /// Missing or corrupt file falls back to defaults.
    pub fn load() -> Self {
        if let Some(path) = Self::get_path()
            && path.exists()
            && let Ok(content) = fs::read_to_string(&path)
            && let Ok(config) = toml::from_str(&content)
        {
            return config;
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::get_path() {
            let content = toml::to_string_pretty(self)?;
            // Write to .tmp then rename so a crash never leaves half a file
            let tmp_path = path.with_extension("tmp");
            fs::write(&tmp_path, content)?;
            fs::rename(tmp_path, path)?;
        }
        Ok(())
    }
}
