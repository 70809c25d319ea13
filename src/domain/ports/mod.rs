//! Port definitions for the domain layer.
//!
//! Traits here abstract the collaborators the authentication pipeline depends
//! on but does not own. Concrete implementations live in
//! `crate::infrastructure` and in the axum glue under `crate::api`.
//!
//! # Available Ports
//!
//! - [`TicketUnprotector`] - Opaque token to ticket conversion
//! - [`Clock`] - Current time for expiry checks
//! - [`HttpRequest`] - Read access to the incoming request
//!
//! Mock implementations of [`TicketUnprotector`] are generated via `mockall`
//! for unit tests.

pub mod clock;
pub mod request;
pub mod unprotector;

pub use clock::{Clock, FixedClock, SystemClock};
pub use request::HttpRequest;
pub use unprotector::{TicketUnprotector, UnprotectError};

#[cfg(test)]
pub use unprotector::MockTicketUnprotector;
