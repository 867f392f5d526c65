use std::net::SocketAddr;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

use crate::error::JukeResult;

pub const LIVENESS_BODY: &str = "Server is up.";

pub fn router() -> Router {
    Router::new().route("/", get(|| async { LIVENESS_BODY }))
}

/// Serves the liveness check until the listener fails.
pub async fn serve(addr: SocketAddr) -> JukeResult<()> {
    let listener = TcpListener::bind(addr).await?;

    info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, router()).await?;

    Ok(())
}
