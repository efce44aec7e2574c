// src/http/mod.rs

//! Axum adapter exposing `PdfCreator` over HTTP.
//!
//! - `POST /pdf` takes `{"sourceHtmlUrl": ..., "fileName": ...}` and answers
//!   with the PDF as an attachment, or a JSON error.
//! - `GET /health` answers `OK`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

pub use error::HttpError;
pub use routes::create_router;
pub use state::AppState;

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {addr}"))?;

    let local = listener.local_addr().unwrap_or(addr);
    info!(addr = %local, "pdfgate listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("serving HTTP")?;

    info!("pdfgate stopped");
    Ok(())
}
