//! # Bearer Gate
//!
//! Bearer token authentication for resource servers built with Axum.
//!
//! Requests carrying `Authorization: Bearer <token>` are resolved into an
//! authentication [`Ticket`](domain::entities::Ticket) through a pluggable
//! unprotection primitive, checked for expiry and audience, and either
//! accepted or answered with an RFC 6750 `WWW-Authenticate` challenge.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Tickets, options, outcomes, extension points and ports
//! - **Application Layer** ([`application`]) - The authentication pipeline stages and coordinator
//! - **Infrastructure Layer** ([`infrastructure`]) - HMAC signed ticket format
//! - **API Layer** ([`api`]) - Axum middleware, extractor and demo handlers
//!
//! ## Extension Points
//!
//! Hosts customize the pipeline through [`domain::events::BearerEvents`]:
//!
//! - `on_retrieve_token` - replace the token, or decide the outcome before resolution
//! - `on_validate_token` - replace or reject the resolved ticket
//! - `on_apply_challenge` - edit the challenge, write a custom response, or suppress it
//!
//! ## Quick Start
//!
//! ```bash
//! export TICKET_SIGNING_SECRET="change-me"
//! export AUTH_AUDIENCES="http://www.example.com"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, AuthError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::AuthenticationCoordinator;
    pub use crate::domain::entities::{AuthenticationProperties, Identity, Ticket};
    pub use crate::domain::events::{
        ApplyChallengeContext, BearerEvents, NoopEvents, RetrieveTokenContext,
        ValidateTokenContext,
    };
    pub use crate::domain::options::AuthenticationOptions;
    pub use crate::domain::outcome::{AuthenticateOutcome, ChallengeOutcome, FailureReason};
    pub use crate::error::{AppError, AuthError};
    pub use crate::infrastructure::format::HmacTicketFormat;
    pub use crate::state::AppState;
}
