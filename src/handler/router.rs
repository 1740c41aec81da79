//! Request dispatch module
//!
//! Entry point for HTTP request processing. Every method is treated as a
//! request for the path; there is a single static root and no routing table.

use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::{resolve, static_files};
use crate::http::{self, ResponseBody};
use crate::logger::{self, LogLevel};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<ResponseBody>, Infallible> {
    let raw_path = req.uri().path();

    let Some(relative) = resolve::relative_path(raw_path) else {
        logger::log_warning(&format!("Undecodable request path: {raw_path}"));
        return Ok(http::build_400_response());
    };

    let resolution = resolve::resolve(&state.config.server.root, &relative).await;
    if logger::enabled(LogLevel::Debug) {
        logger::log_debug(&format!("{} {raw_path} -> {resolution:?}", req.method()));
    }

    Ok(static_files::serve(resolution, raw_path).await)
}
