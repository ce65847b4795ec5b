//! Startup error taxonomy
//!
//! Request-level failures never surface here: they are turned into HTTP
//! responses by the handler. Everything in [`ServerError`] is fatal.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Creating the fallback root or writing its placeholder page failed
    #[error("Failed to prepare serving directory {}: {source}", path.display())]
    StartupDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Port {port} is already in use. Please try a different port or stop the process using this port.")]
    PortInUse { port: u16 },

    #[error("Error starting server: {0}")]
    Bind(#[source] io::Error),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    /// Classify a bind/listen failure for `port`
    pub fn from_bind(port: u16, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::AddrInUse {
            Self::PortInUse { port }
        } else {
            Self::Bind(err)
        }
    }
}
