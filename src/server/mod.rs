//! Server module
//!
//! Binds the listener, runs the accept loop and exposes an explicit
//! shutdown handle so callers other than the signal handler can stop it.

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::site;

pub use listener::create_listener;
pub use server_loop::start_server_loop;
pub use signal::{spawn_signal_handler, ShutdownHandle};

/// A bound, not yet running, static file server
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: ShutdownHandle,
}

impl Server {
    /// Prepare the serving root and bind the listener
    ///
    /// The root exists once this returns, so the first accepted request can
    /// always be served. Must be called from within a tokio runtime.
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        let addr = config.get_socket_addr()?;
        let root = site::prepare_root(&config.content)?;
        let listener =
            create_listener(addr).map_err(|e| ServerError::from_bind(addr.port(), e))?;

        Ok(Self {
            listener,
            state: Arc::new(AppState::new(config, root)),
            shutdown: ShutdownHandle::new(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Absolute path of the serving root
    pub fn root(&self) -> &Path {
        &self.state.canonical_root
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Serve until shutdown is requested through any clone of the handle
    pub async fn run(self) {
        start_server_loop(self.listener, self.state, self.shutdown).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    struct RawResponse {
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    }

    impl RawResponse {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }

        fn assert_cors(&self) {
            assert_eq!(self.header("access-control-allow-origin"), Some("*"));
            assert_eq!(
                self.header("access-control-allow-methods"),
                Some("GET, POST, OPTIONS")
            );
            assert_eq!(
                self.header("access-control-allow-headers"),
                Some("Content-Type")
            );
        }
    }

    fn test_config(base: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 0;
        cfg.content.base_dir = base.to_path_buf();
        cfg
    }

    async fn send(addr: SocketAddr, method: &str, path: &str) -> RawResponse {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();

        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has a header terminator");
        let head = String::from_utf8(raw[..split].to_vec()).unwrap();
        let body = raw[split + 4..].to_vec();

        let mut lines = head.split("\r\n");
        let status = lines
            .next()
            .and_then(|l| l.split_whitespace().nth(1))
            .and_then(|s| s.parse().ok())
            .unwrap();
        let headers = lines
            .filter_map(|l| l.split_once(':'))
            .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
            .collect();

        RawResponse {
            status,
            headers,
            body,
        }
    }

    async fn start(base: &Path) -> (SocketAddr, ShutdownHandle, tokio::task::JoinHandle<()>) {
        let server = Server::bind(test_config(base)).unwrap();
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle();
        let task = tokio::spawn(server.run());
        (addr, handle, task)
    }

    async fn stop(handle: &ShutdownHandle, task: tokio::task::JoinHandle<()>) {
        handle.shutdown();
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("server loop should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_serves_file_bytes_with_cors() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        fs::create_dir(&public).unwrap();
        let bytes: Vec<u8> = (0u8..=255).collect();
        fs::write(public.join("blob.bin"), &bytes).unwrap();

        let (addr, handle, task) = start(dir.path()).await;
        let resp = send(addr, "GET", "/blob.bin").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, bytes);
        assert_eq!(resp.header("content-type"), Some("application/octet-stream"));
        resp.assert_cors();
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_fallback_placeholder_is_served() {
        let dir = TempDir::new().unwrap();
        let (addr, handle, task) = start(dir.path()).await;

        let index = dir.path().join("public").join("index.html");
        assert!(index.is_file());

        let resp = send(addr, "GET", "/").await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(resp.body, fs::read(index).unwrap());
        resp.assert_cors();
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_build_preferred_over_public() {
        let dir = TempDir::new().unwrap();
        for (name, content) in [("build", "from build"), ("public", "from public")] {
            fs::create_dir(dir.path().join(name)).unwrap();
            fs::write(dir.path().join(name).join("index.html"), content).unwrap();
        }

        let server = Server::bind(test_config(dir.path())).unwrap();
        assert_eq!(
            server.root(),
            dir.path().join("build").canonicalize().unwrap()
        );
        let addr = server.local_addr().unwrap();
        let handle = server.shutdown_handle();
        let task = tokio::spawn(server.run());

        let resp = send(addr, "GET", "/index.html").await;
        assert_eq!(resp.body, b"from build");
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_not_found_keeps_serving() {
        let dir = TempDir::new().unwrap();
        let (addr, handle, task) = start(dir.path()).await;

        let missing = send(addr, "GET", "/nope/missing.css").await;
        assert_eq!(missing.status, 404);
        missing.assert_cors();

        let home = send(addr, "GET", "/").await;
        assert_eq!(home.status, 200);
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_options_and_other_methods_carry_cors() {
        let dir = TempDir::new().unwrap();
        let (addr, handle, task) = start(dir.path()).await;

        let preflight = send(addr, "OPTIONS", "/api/not-here").await;
        assert!((200..300).contains(&preflight.status));
        assert!(preflight.body.is_empty());
        preflight.assert_cors();

        let post = send(addr, "POST", "/").await;
        assert_eq!(post.status, 501);
        post.assert_cors();

        let head = send(addr, "HEAD", "/").await;
        assert_eq!(head.status, 200);
        assert!(head.body.is_empty());
        head.assert_cors();
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_directory_redirect_carries_cors() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("public").join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.html"), "docs").unwrap();
        let (addr, handle, task) = start(dir.path()).await;

        let resp = send(addr, "GET", "/docs").await;
        assert_eq!(resp.status, 301);
        assert_eq!(resp.header("location"), Some("/docs/"));
        resp.assert_cors();

        let resp = send(addr, "GET", "/docs/").await;
        assert_eq!(resp.body, b"docs");

        let resp = send(addr, "GET", "//docs").await;
        assert_eq!(resp.status, 301);
        assert_eq!(resp.header("location"), Some("/docs/"));
        stop(&handle, task).await;
    }

    #[tokio::test]
    async fn test_port_in_use_is_reported() {
        let dir = TempDir::new().unwrap();
        let first = Server::bind(test_config(dir.path())).unwrap();
        let port = first.local_addr().unwrap().port();

        let mut cfg = test_config(dir.path());
        cfg.server.port = port;
        match Server::bind(cfg) {
            Err(ServerError::PortInUse { port: p }) => assert_eq!(p, port),
            Err(other) => panic!("expected PortInUse, got {other}"),
            Ok(_) => panic!("second bind on the same port succeeded"),
        }
    }

    #[tokio::test]
    async fn test_shutdown_while_idle() {
        let dir = TempDir::new().unwrap();
        let (addr, handle, task) = start(dir.path()).await;
        stop(&handle, task).await;

        assert!(handle.is_shutdown_requested());
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_before_run_returns_immediately() {
        let dir = TempDir::new().unwrap();
        let server = Server::bind(test_config(dir.path())).unwrap();
        server.shutdown_handle().shutdown();
        tokio::time::timeout(Duration::from_secs(5), server.run())
            .await
            .expect("run should return once shutdown was requested");
    }

    #[tokio::test]
    async fn test_independent_instances() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        fs::create_dir(a.path().join("build")).unwrap();
        fs::write(a.path().join("build").join("who.txt"), "a").unwrap();
        fs::create_dir(b.path().join("build")).unwrap();
        fs::write(b.path().join("build").join("who.txt"), "b").unwrap();

        let (addr_a, handle_a, task_a) = start(a.path()).await;
        let (addr_b, handle_b, task_b) = start(b.path()).await;
        assert_eq!(send(addr_a, "GET", "/who.txt").await.body, b"a");
        assert_eq!(send(addr_b, "GET", "/who.txt").await.body, b"b");
        stop(&handle_a, task_a).await;
        stop(&handle_b, task_b).await;
    }
}
