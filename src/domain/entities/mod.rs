//! Core domain entities representing the authentication data model.
//!
//! Entities are plain data structures. The pipeline stages in
//! [`crate::application::services`] read them; only extension points replace them.
//!
//! # Entity Types
//!
//! - [`Identity`] - Ordered claim-type to claim-value multi-map
//! - [`AuthenticationProperties`] - Ordered string property bag
//! - [`Ticket`] - Identity plus properties, the result of unprotecting a token

pub mod identity;
pub mod properties;
pub mod ticket;

pub use identity::{CLAIM_SCOPE, CLAIM_SUBJECT, Claim, Identity};
pub use properties::AuthenticationProperties;
pub use ticket::Ticket;
