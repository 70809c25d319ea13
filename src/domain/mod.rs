//! Domain layer: authentication data model, outcomes, options, and ports.
//!
//! Nothing in this layer performs I/O. Collaborators the pipeline relies on
//! are expressed as traits in [`ports`] and implemented elsewhere.
//!
//! # Architecture
//!
//! - [`entities`] - Ticket, identity, and property bag
//! - [`outcome`] - Failure taxonomy and per-stage outcomes
//! - [`challenge`] - Challenge parameters
//! - [`options`] - Frozen handler configuration
//! - [`events`] - Extension point contexts and callbacks
//! - [`ports`] - Unprotection primitive, clock, request view
//!
//! # Request Lifecycle
//!
//! 1. Options are built once and shared by every request
//! 2. A token is retrieved from the request (extension point 1)
//! 3. The token is unprotected into a [`entities::Ticket`]
//! 4. The ticket is validated (extension point 2)
//! 5. On failure, a challenge is assembled (extension point 3)

pub mod challenge;
pub mod entities;
pub mod events;
pub mod options;
pub mod outcome;
pub mod ports;
