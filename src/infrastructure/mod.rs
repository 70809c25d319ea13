//! Infrastructure layer for concrete collaborators.
//!
//! This layer implements ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`format`] - Ticket data formats implementing the unprotection primitive

pub mod format;
