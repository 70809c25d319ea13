//! Application layer: the stages of the bearer authentication pipeline.
//!
//! Each stage is a small, mostly pure function over domain types. The
//! [`services::coordinator::AuthenticationCoordinator`] composes them into the
//! `authenticate` and `challenge` entry points the host calls per request.
//!
//! # Available Services
//!
//! - [`services::token_extractor`] - Bearer token lookup in `Authorization`
//! - [`services::ticket_resolver`] - Token unprotection into a ticket
//! - [`services::policy_validator`] - Expiry and audience acceptance
//! - [`services::event_pipeline`] - The three extension points
//! - [`services::error_classifier`] - Failure to RFC 6750 error mapping
//! - [`services::challenge_builder`] - `WWW-Authenticate` rendering

pub mod services;

pub use services::AuthenticationCoordinator;
