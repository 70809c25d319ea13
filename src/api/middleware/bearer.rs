//! Bearer token authentication middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::entities::AuthenticationProperties;
use crate::domain::outcome::{AuthenticateOutcome, ChallengeOutcome, HandledResponse};
use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Run [`crate::application::AuthenticationCoordinator::authenticate`]
/// 2. On success, store the [`Ticket`](crate::domain::entities::Ticket) in request extensions
/// 3. On failure, issue the challenge built by the coordinator
/// 4. When an extension skipped authentication or the challenge, pass the
///    request through without a ticket
///
/// # Errors
///
/// Returns `500 Internal Server Error` if the ticket unprotection backend
/// fails, or if an extension wrote a response that cannot be encoded.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::bearer;
///
/// let protected = Router::new()
///     .route("/api/me", get(me_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), bearer::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let reason = match st.coordinator.authenticate(&parts).await? {
        AuthenticateOutcome::Authenticated(ticket) => {
            parts.extensions.insert(ticket);
            return Ok(next.run(Request::from_parts(parts, body)).await);
        }
        AuthenticateOutcome::NotAttempted => {
            return Ok(next.run(Request::from_parts(parts, body)).await);
        }
        AuthenticateOutcome::Failed(reason) => reason,
    };

    let challenge = st
        .coordinator
        .challenge(Some(reason), &AuthenticationProperties::new())
        .await;

    match challenge {
        ChallengeOutcome::Unauthorized { www_authenticate } => {
            let value = HeaderValue::from_str(&www_authenticate).map_err(|e| {
                AppError::internal(
                    "Invalid challenge header",
                    json!({ "reason": e.to_string() }),
                )
            })?;
            Ok((StatusCode::UNAUTHORIZED, [(header::WWW_AUTHENTICATE, value)]).into_response())
        }
        ChallengeOutcome::Handled(response) => handled_response(response),
        ChallengeOutcome::Skipped => Ok(next.run(Request::from_parts(parts, body)).await),
    }
}

fn handled_response(handled: HandledResponse) -> Result<Response, AppError> {
    let mut builder = Response::builder().status(handled.status);
    for (name, value) in &handled.headers {
        builder = builder.header(
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid_handled(e.to_string()))?,
            HeaderValue::from_str(value).map_err(|e| invalid_handled(e.to_string()))?,
        );
    }

    builder
        .body(Body::from(handled.body))
        .map_err(|e| invalid_handled(e.to_string()))
}

fn invalid_handled(reason: String) -> AppError {
    tracing::error!(%reason, "extension produced an invalid response");
    AppError::internal("Invalid extension response", json!({ "reason": reason }))
}
