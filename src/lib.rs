//! Static file server with permissive CORS headers
//!
//! Serves `build/` (or `public/`, created with a placeholder page when
//! missing) over plain HTTP, adding `Access-Control-Allow-*` headers to
//! every response.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod site;

pub use crate::config::Config;
pub use crate::error::ServerError;
pub use crate::server::{Server, ShutdownHandle};
