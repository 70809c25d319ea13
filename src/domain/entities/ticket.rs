//! Ticket entity: the outcome of a successful token unprotection.

use serde::{Deserialize, Serialize};

use super::identity::Identity;
use super::properties::AuthenticationProperties;

/// An authenticated identity together with its property bag.
///
/// Produced by a [`crate::domain::ports::TicketUnprotector`]. Policy checks
/// read the ticket but never rewrite it; only extension points may replace
/// a ticket wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub identity: Identity,
    pub properties: AuthenticationProperties,
}

impl Ticket {
    /// Creates a new ticket.
    pub fn new(identity: Identity, properties: AuthenticationProperties) -> Self {
        Self {
            identity,
            properties,
        }
    }

    /// Subject of the ticket's identity.
    pub fn subject(&self) -> Option<&str> {
        self.identity.name()
    }
}
