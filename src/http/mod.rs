//! HTTP protocol layer module
//!
//! Response builders, header decorators and validators, kept apart from
//! the file resolution logic in `handler`.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cors::with_cors_headers;
pub use response::{
    build_304_response, build_404_response, build_501_response, build_file_response,
    build_options_response, build_redirect_response,
};
