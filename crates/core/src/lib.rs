//! Core domain types and shared configuration for filestash.
//!
//! This crate defines the pieces every other crate agrees on:
//! - Stored file identifiers and the policies that generate them
//! - Application configuration

pub mod config;
pub mod error;
pub mod file_id;

pub use error::{Error, Result};
pub use file_id::{FileId, IdPolicy};

/// Default cap on candidate identifiers tried per upload.
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: u32 = 32;

/// Default maximum upload body size: 100 MiB
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024;
