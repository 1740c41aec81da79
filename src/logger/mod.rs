//! Logger module
//!
//! Provides logging utilities for the file server including:
//! - Server lifecycle logging
//! - Error and warning logging with timestamps
//! - Optional file-based error log

mod level;
pub mod writer;

pub use level::LogLevel;

use crate::config::Config;
use chrono::Local;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config
        .logging
        .level
        .parse::<LogLevel>()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    writer::init(level, config.logging.error_log_file.as_deref())
}

/// Level in effect; `Info` until the writer is initialized
fn current_level() -> LogLevel {
    writer::get().map_or(LogLevel::Info, writer::LogWriter::level)
}

/// Whether messages at `level` are written; check before building costly messages
pub fn enabled(level: LogLevel) -> bool {
    current_level().allows(level)
}

fn write(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }

    let line = format!(
        "{} [{level}] {message}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    );
    match (writer::get(), level) {
        (Some(w), LogLevel::Error | LogLevel::Warn) => w.write_error(&line),
        (Some(w), _) => w.write_info(&line),
        (None, LogLevel::Error | LogLevel::Warn) => eprintln!("{line}"),
        (None, _) => println!("{line}"),
    }
}

/// Announce the bound address and served root on stdout
pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!(
        "Serving {} on http://{addr}",
        config.server.root.display()
    );
    log_info(&format!("Worker threads: {}", config.server.workers));
    log_info(&format!("Max concurrent connections: {}", config.max_concurrency()));
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    if !config.server.root.is_dir() {
        log_warning(&format!(
            "Root directory {} does not exist or is not a directory; every request will get 404",
            config.server.root.display()
        ));
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    if enabled(LogLevel::Debug) {
        log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
    }
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_traversal_blocked(request_path: &str) {
    log_warning(&format!("Path traversal attempt blocked: {request_path}"));
}

pub fn log_stream_aborted(path: &Path, err: &std::io::Error) {
    log_error(&format!(
        "Aborted response body for '{}': {err}",
        path.display()
    ));
}

pub fn log_shutdown(signal: &str) {
    log_info(&format!("{signal} received, shutting down"));
}

pub fn log_error(message: &str) {
    write(LogLevel::Error, message);
}

pub fn log_warning(message: &str) {
    write(LogLevel::Warn, message);
}

pub fn log_info(message: &str) {
    write(LogLevel::Info, message);
}

pub fn log_debug(message: &str) {
    write(LogLevel::Debug, message);
}
