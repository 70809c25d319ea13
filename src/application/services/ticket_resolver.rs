//! Turns a token string into a ticket through the unprotection primitive.

use crate::domain::outcome::{FailureReason, ValidationOutcome};
use crate::domain::ports::{TicketUnprotector, UnprotectError};

/// Resolves a token into a ticket.
///
/// No expiry or audience checks happen here; see
/// [`super::policy_validator::validate`].
///
/// # Returns
///
/// - `Failure(Missing)` for an absent or empty token, without calling the primitive
/// - `Failure(Malformed)` when the primitive rejects the token
/// - `Success(ticket)` otherwise
///
/// # Errors
///
/// Propagates [`UnprotectError`] from the primitive unchanged.
pub fn resolve(
    unprotector: &dyn TicketUnprotector,
    token: Option<&str>,
) -> Result<ValidationOutcome, UnprotectError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(ValidationOutcome::Failure(FailureReason::Missing));
    };

    Ok(match unprotector.unprotect(token)? {
        Some(ticket) => ValidationOutcome::Success(ticket),
        None => ValidationOutcome::Failure(FailureReason::Malformed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Identity, Ticket};
    use crate::domain::ports::MockTicketUnprotector;

    #[test]
    fn test_missing_token_skips_primitive() {
        let mut mock = MockTicketUnprotector::new();
        mock.expect_unprotect().times(0);

        assert_eq!(
            resolve(&mock, None).unwrap(),
            ValidationOutcome::Failure(FailureReason::Missing)
        );
        assert_eq!(
            resolve(&mock, Some("")).unwrap(),
            ValidationOutcome::Failure(FailureReason::Missing)
        );
    }

    #[test]
    fn test_rejected_token_is_malformed() {
        let mut mock = MockTicketUnprotector::new();
        mock.expect_unprotect()
            .withf(|token| token == "invalid-token")
            .times(1)
            .returning(|_| Ok(None));

        assert_eq!(
            resolve(&mock, Some("invalid-token")).unwrap(),
            ValidationOutcome::Failure(FailureReason::Malformed)
        );
    }

    #[test]
    fn test_resolved_ticket_is_returned() {
        let ticket = Ticket::new(Identity::new().with_claim("sub", "Fabrikam"), Default::default());
        let expected = ticket.clone();

        let mut mock = MockTicketUnprotector::new();
        mock.expect_unprotect()
            .times(1)
            .returning(move |_| Ok(Some(ticket.clone())));

        assert_eq!(
            resolve(&mock, Some("valid-token")).unwrap(),
            ValidationOutcome::Success(expected)
        );
    }

    #[test]
    fn test_infrastructure_errors_propagate() {
        let mut mock = MockTicketUnprotector::new();
        mock.expect_unprotect()
            .returning(|_| Err(UnprotectError::Unavailable("key store down".to_string())));

        let err = resolve(&mock, Some("token")).unwrap_err();
        assert!(matches!(err, UnprotectError::Unavailable(_)));
    }
}
