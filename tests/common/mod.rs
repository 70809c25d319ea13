#![allow(dead_code)]

use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use bearer_gate::api::handlers::health_handler;
use bearer_gate::api::middleware::bearer;
use bearer_gate::api::routes::protected_routes;
use bearer_gate::application::AuthenticationCoordinator;
use bearer_gate::domain::entities::{AuthenticationProperties, Identity, Ticket};
use bearer_gate::domain::options::{AuthenticationOptions, AuthenticationOptionsBuilder};
use bearer_gate::domain::ports::TicketUnprotector;
use bearer_gate::infrastructure::format::HmacTicketFormat;
use bearer_gate::state::AppState;
use chrono::{Duration, Utc};
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const AUDIENCE: &str = "http://www.example.com";

pub fn ticket_format() -> HmacTicketFormat {
    HmacTicketFormat::new(SIGNING_SECRET)
}

/// Ticket for `subject`, expiring `expires_in` from now.
pub fn create_test_ticket(subject: &str, audiences: &[&str], expires_in: Duration) -> Ticket {
    let mut properties = AuthenticationProperties::new();
    properties.set_issued_at(Utc::now());
    properties.set_expires_at(Utc::now() + expires_in);
    if !audiences.is_empty() {
        properties.set_audiences(audiences.iter().copied());
    }
    properties.set_scopes(["read"]);

    Ticket::new(Identity::new().with_claim("sub", subject), properties)
}

pub fn protect(ticket: &Ticket) -> String {
    ticket_format().protect(ticket).unwrap()
}

/// Valid token for `subject` issued for [`AUDIENCE`].
pub fn valid_token(subject: &str) -> String {
    protect(&create_test_ticket(subject, &[AUDIENCE], Duration::hours(1)))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn create_test_state(
    configure: impl FnOnce(AuthenticationOptionsBuilder) -> AuthenticationOptionsBuilder,
) -> AppState {
    create_test_state_with(Arc::new(ticket_format()), configure)
}

pub fn create_test_state_with(
    unprotector: Arc<dyn TicketUnprotector>,
    configure: impl FnOnce(AuthenticationOptionsBuilder) -> AuthenticationOptionsBuilder,
) -> AppState {
    let options = configure(AuthenticationOptions::builder(unprotector)).build();
    AppState::new(Arc::new(AuthenticationCoordinator::new(Arc::new(options))))
}

pub fn create_test_server(state: AppState) -> TestServer {
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer::layer));

    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .with_state(state);

    TestServer::new(app).unwrap()
}
