//! Serving root selection
//!
//! Picks the directory exposed over HTTP and, when it does not exist yet,
//! creates it with a placeholder page so `GET /` always has something to return.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ContentConfig;
use crate::error::ServerError;

pub const PLACEHOLDER_FILE: &str = "index.html";

/// Select the serving root: the build output if present, else the public dir
pub fn select_root(content: &ContentConfig) -> PathBuf {
    let build = content.base_dir.join(&content.build_dir);
    if build.exists() {
        build
    } else {
        content.base_dir.join(&content.public_dir)
    }
}

/// Create `root` with a placeholder index page if it is missing
///
/// Returns `true` when the placeholder was written. An existing root is
/// left untouched, even if it has no index page.
pub fn ensure_root(root: &Path) -> Result<bool, ServerError> {
    if root.exists() {
        return Ok(false);
    }

    let startup_err = |source| ServerError::StartupDirectory {
        path: root.to_path_buf(),
        source,
    };
    fs::create_dir_all(root).map_err(startup_err)?;
    fs::write(root.join(PLACEHOLDER_FILE), placeholder_page()).map_err(startup_err)?;
    Ok(true)
}

/// Resolve and prepare the serving root in one step
pub fn prepare_root(content: &ContentConfig) -> Result<PathBuf, ServerError> {
    let root = select_root(content);
    if ensure_root(&root)? {
        crate::logger::log_placeholder_created(&root);
    }
    Ok(root)
}

/// Placeholder page written into a freshly created root
pub fn placeholder_page() -> &'static str {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>corsserve</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            text-align: center;
            padding: 50px;
            background-color: #2a2a2a;
            color: white;
        }
        .container { max-width: 600px; margin: 0 auto; }
        h1 { color: #4ade80; }
        .instructions {
            background: #333;
            padding: 20px;
            border-radius: 8px;
            margin: 20px 0;
            text-align: left;
        }
        .command {
            background: #4ade80;
            color: #1a1a1a;
            padding: 10px;
            border-radius: 4px;
            font-family: monospace;
            margin: 10px 0;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Nothing built yet</h1>
        <div class="instructions">
            <h3>This page was generated because no content directory existed.</h3>
            <p>Build your front-end so its output lands in <code>build/</code>:</p>
            <div class="command">npm run build</div>
            <p>Then restart the server; the build output is served in preference to <code>public/</code>.</p>
            <div class="command">corsserve</div>
            <p>Files are served with permissive CORS headers on the port shown in the server log.</p>
        </div>
    </div>
</body>
</html>
"#
}
