//! Logger module
//!
//! Lifecycle lines go to stdout, errors and warnings to stderr, and each
//! served request gets one access log line.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use std::path::Path;

use crate::error::ServerError;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub const SERVER_STOPPED: &str = "Server stopped.";

/// Startup banner: port, absolute root and the URL to open
pub fn server_start_lines(addr: &SocketAddr, root: &Path) -> Vec<String> {
    let port = addr.port();
    vec![
        "======================================".to_string(),
        format!("Starting server on port {port}"),
        format!("Serving files from: {}", root.display()),
        format!("Open your browser and go to: http://localhost:{port}"),
        "Press Ctrl+C to stop the server".to_string(),
        "======================================\n".to_string(),
    ]
}

pub fn log_server_start(addr: &SocketAddr, root: &Path) {
    for line in server_start_lines(addr, root) {
        write_info(&line);
    }
}

pub fn log_placeholder_created(root: &Path) {
    write_info(&format!(
        "[Setup] No content directory found, created {} with a placeholder index.html",
        root.display()
    ));
}

pub fn log_shutdown_signal(signal: &str) {
    write_info(&format!("\n[Signal] {signal} received, shutting down..."));
}

pub fn log_server_stopped() {
    write_info(SERVER_STOPPED);
}

/// Report a fatal startup failure; the message alone, no backtrace
pub fn log_startup_error(err: &ServerError) {
    write_error(&err.to_string());
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_error(&entry.format(format));
}
