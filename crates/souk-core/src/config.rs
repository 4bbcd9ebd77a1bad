//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default marketplace API endpoint, matching the development server.
const DEFAULT_API_URL: &str = "http://localhost:3131";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the marketplace API
    pub api_url: String,
    /// Path to the database file
    pub database_path: PathBuf,
    /// Optional push-notification device identifier, forwarded
    /// opaquely on login/logout
    pub device_token: Option<String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_url: std::env::var("SOUK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            database_path: data_dir.join("souk.db"),
            device_token: std::env::var("SOUK_DEVICE_TOKEN").ok(),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("SOUK"))
            .unwrap_or_else(|| PathBuf::from(".souk"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for the data directory
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}
