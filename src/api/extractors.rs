//! Extractor for the ticket placed in request extensions by the bearer middleware.

use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::domain::entities::Ticket;

/// Authenticated ticket of the current request.
///
/// Requires [`crate::api::middleware::bearer::layer`] on the route. Rejects
/// with `401` (without a challenge) when no ticket is present, e.g. because an
/// extension skipped authentication.
pub struct AuthenticatedTicket(pub Ticket);

impl<S> FromRequestParts<S> for AuthenticatedTicket
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Ticket>()
            .cloned()
            .map(AuthenticatedTicket)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
