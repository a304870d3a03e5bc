//! tally server binary.
//!
//! - HTTP endpoint: /counter (any method, anonymous)
//! - Backing store selected by TALLY_CONNECTION_STRING (memory: / file:<path>)
//! - Optional tally.yaml for listen address and table name
//! - /healthz and /metrics beside the counter route

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use tally_server::{app_state, config, router};

const CONFIG_FILE: &str = "tally.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Config is validated eagerly: a missing credential or bad scheme fails
    // here, never per request.
    let path = std::path::Path::new(CONFIG_FILE)
        .exists()
        .then_some(CONFIG_FILE);
    let cfg = config::load(path).expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("store open failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "tally-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
