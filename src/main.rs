use std::sync::Arc;

use static_root::config::{AppState, Config};
use static_root::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Usage: static_root [port] [root_dir]
    let cfg = Config::from_args(std::env::args().skip(1))?;
    logger::init(&cfg)?;

    // Fixed-size worker pool; each connection runs to completion on one of these threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(cfg.server.workers)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::bind_listener(addr)?;
    let shutdown = server::shutdown_signal()?;

    logger::log_server_start(&listener.local_addr()?, &cfg);

    let state = Arc::new(AppState::new(cfg));
    server::run(listener, state, shutdown).await;

    Ok(())
}
