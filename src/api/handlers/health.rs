//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "authentication": {
///       "status": "ok",
///       "message": "Scheme: Bearer, audiences: 1"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let options = state.coordinator.options();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            authentication: CheckStatus {
                status: "ok".to_string(),
                message: Some(format!(
                    "Scheme: {}, audiences: {}",
                    options.authentication_scheme(),
                    options.audiences().len()
                )),
            },
        },
    })
}
