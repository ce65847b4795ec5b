// Configuration module entry point
// Loads the server configuration from built-in defaults and an optional file

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

pub use state::AppState;
pub use types::{
    Config, ContentConfig, LoggingConfig, ServerConfig, DEFAULT_BUILD_DIR, DEFAULT_PORT,
    DEFAULT_PUBLIC_DIR,
};
use types::{DEFAULT_ACCESS_LOG_FORMAT, DEFAULT_HOST, DEFAULT_INDEX_FILES};

/// Stem of the optional configuration file looked up in the working directory
pub const CONFIG_FILE_STEM: &str = "corsserve";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error: every key has a default, so the
    /// server runs with the built-in constants when no file is present.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("content.base_dir", ".")?
            .set_default("content.build_dir", DEFAULT_BUILD_DIR)?
            .set_default("content.public_dir", DEFAULT_PUBLIC_DIR)?
            .set_default("content.index_files", DEFAULT_INDEX_FILES.to_vec())?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", DEFAULT_ACCESS_LOG_FORMAT)?
            .add_source(config::File::with_name(config_path).required(false))
            .build()?;

        settings.try_deserialize()
    }

    /// Load `corsserve.*` from the working directory, falling back to defaults
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(CONFIG_FILE_STEM)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("{}: {e}", self.server.host)))
    }
}
