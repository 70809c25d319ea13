//! HTTP server initialization and runtime setup.
//!
//! Wires the ticket format, authentication options and coordinator, then
//! runs the Axum server until Ctrl+C.

use crate::application::AuthenticationCoordinator;
use crate::config::Config;
use crate::domain::ports::TicketUnprotector;
use crate::infrastructure::format::HmacTicketFormat;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - HMAC ticket format from `TICKET_SIGNING_SECRET`
/// - Frozen authentication options
/// - Authentication coordinator shared by all requests
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let unprotector: Arc<dyn TicketUnprotector> =
        Arc::new(HmacTicketFormat::new(config.ticket_signing_secret.clone()));

    let options = config.authentication_options(unprotector);
    tracing::info!(
        scheme = options.authentication_scheme(),
        audiences = options.audiences().len(),
        "Bearer authentication configured"
    );

    let coordinator = Arc::new(AuthenticationCoordinator::new(Arc::new(options)));
    let state = AppState::new(coordinator);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
