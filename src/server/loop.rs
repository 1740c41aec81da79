// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop.
///
/// A connection is only accepted once a request slot is free, so excess
/// clients wait in the listen backlog instead of being dropped. Accept errors
/// (e.g. running out of file descriptors) are logged and the loop keeps going.
/// Returns once `shutdown` resolves; connections already being served finish
/// in their own tasks for as long as the runtime lives.
pub async fn run<S>(listener: TcpListener, state: Arc<AppState>, shutdown: S)
where
    S: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    loop {
        let permit = tokio::select! {
            permit = Arc::clone(&state.permits).acquire_owned() => {
                match permit {
                    Ok(permit) => permit,
                    Err(e) => {
                        logger::log_error(&format!("Request slots closed: {e}"));
                        break;
                    }
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown(signal);
                break;
            }
        };

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state, permit),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown(signal);
                break;
            }
        }
    }
}
