use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::ServerConfig;
use crate::error::{PulseError, Result};

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| PulseError::Internal(format!("invalid bind address {}: {e}", server.host)))
}

/// Start the dashboard server and run until `shutdown` resolves
pub async fn start_api_server<F>(state: AppState, server: &ServerConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let feed = state.source.name();
    let app = create_router(state);

    let addr = bind_addr(server)?;
    let listener = TcpListener::bind(addr).await?;
    info!(feed, "🚀 dashboard listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("dashboard server stopped");
    Ok(())
}
