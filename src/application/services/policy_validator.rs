//! Expiry and audience acceptance rules for resolved tickets.

use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::domain::entities::Ticket;
use crate::domain::outcome::{FailureReason, ValidationOutcome};

/// Applies expiry, then audience checks to a ticket.
///
/// # Rules
///
/// 1. An expiry strictly before `now` yields `Failure(Expired)`
/// 2. With a non-empty `audiences` set, the ticket must list at least one of
///    them (exact, case-sensitive match) or `Failure(AudienceMismatch)` is returned
/// 3. Otherwise the ticket is returned unchanged
pub fn validate(
    ticket: Ticket,
    audiences: &HashSet<String>,
    now: DateTime<Utc>,
) -> ValidationOutcome {
    if is_expired(&ticket, now) {
        return ValidationOutcome::Failure(FailureReason::Expired);
    }

    if !audience_accepted(&ticket, audiences) {
        return ValidationOutcome::Failure(FailureReason::AudienceMismatch);
    }

    ValidationOutcome::Success(ticket)
}

fn is_expired(ticket: &Ticket, now: DateTime<Utc>) -> bool {
    ticket.properties.expires_at().is_some_and(|exp| exp < now)
}

fn audience_accepted(ticket: &Ticket, audiences: &HashSet<String>) -> bool {
    if audiences.is_empty() {
        return true;
    }

    ticket
        .properties
        .audiences()
        .iter()
        .any(|a| audiences.contains(a))
}
