//! Static file server for a single root directory.
//!
//! Requests are resolved beneath the configured root, never outside it, and
//! matching files are streamed back with a best-effort content type.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
