// Connection handling module
// Serves a single accepted TCP connection on the worker pool

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::OwnedSemaphorePermit;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Hand an accepted connection to a worker.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `permit` - Request slot held until the connection is done
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: &Arc<AppState>,
    permit: OwnedSemaphorePermit,
) {
    state.active_connections.fetch_add(1, Ordering::SeqCst);
    logger::log_connection_accepted(&peer_addr);
    handle_connection(stream, Arc::clone(state), permit);
}

/// Serve one connection in a task on the runtime's worker pool.
///
/// Keep-alive is off, so the connection carries exactly one request and the
/// slot is released as soon as that response is finished. Failures stay inside
/// the task: a body that aborts mid-stream or a client that disconnects ends
/// this connection only.
fn handle_connection(
    stream: tokio::net::TcpStream,
    state: Arc<AppState>,
    permit: OwnedSemaphorePermit,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service_state = Arc::clone(&state);
        let conn = http1::Builder::new().keep_alive(false).serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state))),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }

        state.active_connections.fetch_sub(1, Ordering::SeqCst);
        drop(permit);
    });
}
