//! HTTP file store server.
//!
//! This crate provides the HTTP surface:
//! - Multipart upload with identifier allocation
//! - Inline and attachment downloads
//! - Listing and deletion of stored files
//! - Startup consistency scan between records and blobs

pub mod config;
pub mod consistency;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
