//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::bearer`].

use crate::api::handlers::me_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET /me` - Identity of the authenticated caller
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/me", get(me_handler))
}
