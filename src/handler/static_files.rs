//! Static file serving module
//!
//! Maps request paths onto the serving root, loads the file and builds the
//! response with its validators.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of mapping a request path onto the serving root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A regular file to serve
    File(PathBuf),
    /// A directory requested without its trailing slash; holds the new location
    Redirect(String),
    NotFound,
}

/// Resolve `request_path` (still percent-encoded) against `root`
///
/// Empty, `.` and `..` segments are dropped so the result never climbs
/// above the root. Symlinks are followed, but the final canonical path must
/// stay under `canonical_root`.
pub fn resolve_path(
    root: &Path,
    canonical_root: &Path,
    request_path: &str,
    query: Option<&str>,
    index_files: &[String],
) -> Resolution {
    let Ok(decoded) = percent_decode_str(request_path).decode_utf8() else {
        return Resolution::NotFound;
    };
    let trailing_slash = decoded.ends_with('/');

    let mut file_path = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." | ".." => continue,
            s if s.contains('\\') || s.contains('\0') => return Resolution::NotFound,
            s => file_path.push(s),
        }
    }

    let Ok(metadata) = fs::metadata(&file_path) else {
        return Resolution::NotFound;
    };

    if metadata.is_dir() {
        if !trailing_slash {
            // A single leading slash: `//host` would be a protocol-relative URL
            let path = request_path.trim_start_matches('/');
            let location = match query {
                Some(q) => format!("/{path}/?{q}"),
                None => format!("/{path}/"),
            };
            return Resolution::Redirect(location);
        }
        match index_files
            .iter()
            .map(|index| file_path.join(index))
            .find(|candidate| candidate.is_file())
        {
            Some(index) => file_path = index,
            None => return Resolution::NotFound,
        }
    } else if trailing_slash || !metadata.is_file() {
        return Resolution::NotFound;
    }

    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return Resolution::NotFound;
    };
    if !file_path_canonical.starts_with(canonical_root) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            file_path_canonical.display()
        ));
        return Resolution::NotFound;
    }

    Resolution::File(file_path)
}

/// Serve a GET/HEAD request from the serving root
pub async fn serve_static(
    ctx: &RequestContext<'_>,
    root: &Path,
    canonical_root: &Path,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match resolve_path(root, canonical_root, ctx.path, ctx.query, index_files) {
        Resolution::File(path) => serve_file(ctx, &path).await,
        Resolution::Redirect(location) => http::build_redirect_response(&location),
        Resolution::NotFound => http::build_404_response(ctx.is_head),
    }
}

/// Serve a single resolved file, honouring conditional request headers
pub async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let content = match tokio::fs::read(file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return http::build_404_response(ctx.is_head);
        }
    };

    let modified = tokio::fs::metadata(file_path)
        .await
        .and_then(|m| m.modified())
        .ok();
    let last_modified = modified.map(cache::http_date);
    let etag = cache::generate_etag(&content);

    // If-None-Match takes precedence; If-Modified-Since only applies without it
    let not_modified = if ctx.if_none_match.is_some() {
        cache::check_etag_match(ctx.if_none_match.as_deref(), &etag)
    } else {
        modified.is_some_and(|m| cache::not_modified_since(ctx.if_modified_since.as_deref(), m))
    };
    if not_modified {
        return http::build_304_response(&etag, last_modified.as_deref());
    }

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file_path),
        &etag,
        last_modified.as_deref(),
        ctx.is_head,
    )
}
