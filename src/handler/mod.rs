//! Request handler module
//!
//! Resolves request paths beneath the served root and streams the matching file.

pub mod resolve;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
