// Configuration types module
// Defines the typed configuration passed into the server

use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];
pub const DEFAULT_ACCESS_LOG_FORMAT: &str = "common";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Where the served content lives
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Directory that `build_dir` and `public_dir` are relative to
    pub base_dir: PathBuf,
    /// Preferred serving root (front-end build output)
    pub build_dir: String,
    /// Fallback serving root, created with a placeholder page when missing
    pub public_dir: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            build_dir: DEFAULT_BUILD_DIR.to_string(),
            public_dir: DEFAULT_PUBLIC_DIR.to_string(),
            index_files: DEFAULT_INDEX_FILES.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    DEFAULT_ACCESS_LOG_FORMAT.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: default_access_log_format(),
        }
    }
}
