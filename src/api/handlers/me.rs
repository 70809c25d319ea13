//! Handler returning the authenticated caller.

use axum::Json;

use crate::api::dto::me::MeResponse;
use crate::api::extractors::AuthenticatedTicket;

/// Returns the identity resolved from the caller's bearer token.
///
/// # Endpoint
///
/// `GET /api/me`
///
/// # Response Codes
///
/// - **200 OK**: Token accepted
/// - **401 Unauthorized**: Token missing, invalid, expired, or for another audience
pub async fn me_handler(AuthenticatedTicket(ticket): AuthenticatedTicket) -> Json<MeResponse> {
    Json(MeResponse::from(&ticket))
}
