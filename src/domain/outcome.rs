//! Outcome types produced by the authentication pipeline.

use std::fmt;

use crate::domain::entities::Ticket;

/// Why a request-supplied credential was not accepted.
///
/// These are local authentication failures: they travel as values from
/// `authenticate` to `challenge` and are never raised as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// No token was presented.
    Missing,
    /// The token could not be unprotected.
    Malformed,
    /// The ticket's expiry lies in the past.
    Expired,
    /// None of the ticket's audiences is acceptable.
    AudienceMismatch,
    /// An extension point handled the request without supplying a ticket.
    RejectedByExtension,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::AudienceMismatch => "audience_mismatch",
            Self::RejectedByExtension => "rejected_by_extension",
        };
        f.write_str(s)
    }
}

/// Result of resolving or validating a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Success(Ticket),
    Failure(FailureReason),
}

impl ValidationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Result of running one extension point.
///
/// `Continue` carries the (possibly replaced) input for the next built-in
/// stage; `Handled` carries the final value the extension left on its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionOutcome<C, H = C> {
    /// Proceed with the built-in stage.
    Continue(C),
    /// The extension produced the final result.
    Handled(H),
    /// The handler declines to participate for this request.
    Skipped,
}

/// Final result of `authenticate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticateOutcome {
    Authenticated(Ticket),
    Failed(FailureReason),
    /// An extension skipped this handler; no challenge is written.
    NotAttempted,
}

impl AuthenticateOutcome {
    pub fn ticket(&self) -> Option<&Ticket> {
        match self {
            Self::Authenticated(ticket) => Some(ticket),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<FailureReason> {
        match self {
            Self::Failed(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<ValidationOutcome> for AuthenticateOutcome {
    fn from(outcome: ValidationOutcome) -> Self {
        match outcome {
            ValidationOutcome::Success(ticket) => Self::Authenticated(ticket),
            ValidationOutcome::Failure(reason) => Self::Failed(reason),
        }
    }
}

/// A response written by the challenge extension point itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandledResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Default for HandledResponse {
    fn default() -> Self {
        Self {
            status: 401,
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

/// Final result of `challenge`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// Respond with 401 and the given `WWW-Authenticate` value.
    Unauthorized { www_authenticate: String },
    /// The extension wrote its own response.
    Handled(HandledResponse),
    /// Emit nothing; the host continues as if no challenge was requested.
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_outcome_into_authenticate_outcome() {
        let ticket = Ticket::default();

        let outcome: AuthenticateOutcome = ValidationOutcome::Success(ticket.clone()).into();
        assert_eq!(outcome.ticket(), Some(&ticket));
        assert!(outcome.failure().is_none());

        let outcome: AuthenticateOutcome =
            ValidationOutcome::Failure(FailureReason::Expired).into();
        assert_eq!(outcome.failure(), Some(FailureReason::Expired));
        assert!(outcome.ticket().is_none());
    }

    #[test]
    fn test_handled_response_defaults_to_401() {
        let response = HandledResponse::default();
        assert_eq!(response.status, 401);
        assert!(response.headers.is_empty());
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::AudienceMismatch.to_string(), "audience_mismatch");
    }
}
