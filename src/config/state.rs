// Application state module
// Immutable per-server state shared by every connection task

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Serving root as selected at startup
    pub root: PathBuf,
    /// Canonical form of `root`, used to reject paths escaping it
    pub canonical_root: PathBuf,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.clone());
        Self {
            config,
            root,
            canonical_root,
        }
    }

    pub fn index_files(&self) -> &[String] {
        &self.config.content.index_files
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
