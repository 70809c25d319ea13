//! Top-level authentication state machine.

use std::sync::Arc;

use crate::domain::entities::properties::PROPERTY_ACCESS_TOKEN;
use crate::domain::entities::{AuthenticationProperties, Ticket};
use crate::domain::options::AuthenticationOptions;
use crate::domain::outcome::{
    AuthenticateOutcome, ChallengeOutcome, ExtensionOutcome, FailureReason, ValidationOutcome,
};
use crate::domain::ports::{Clock, HttpRequest, SystemClock};
use crate::error::AuthError;

use super::{
    challenge_builder, error_classifier, event_pipeline, policy_validator, ticket_resolver,
    token_extractor,
};

/// Composes the pipeline stages into the `authenticate` and `challenge`
/// entry points used by the host.
///
/// Holds only the frozen options and a clock, so one instance serves every
/// request concurrently.
pub struct AuthenticationCoordinator {
    options: Arc<AuthenticationOptions>,
    clock: Arc<dyn Clock>,
}

impl AuthenticationCoordinator {
    /// Creates a coordinator using the system clock.
    pub fn new(options: Arc<AuthenticationOptions>) -> Self {
        Self::with_clock(options, Arc::new(SystemClock))
    }

    pub fn with_clock(options: Arc<AuthenticationOptions>, clock: Arc<dyn Clock>) -> Self {
        Self { options, clock }
    }

    pub fn options(&self) -> &AuthenticationOptions {
        &self.options
    }

    /// Authenticates a request.
    ///
    /// # Flow
    ///
    /// 1. Extract the header token and run the retrieve-token extension
    /// 2. Resolve the token into a ticket
    /// 3. Store the raw token when `save_token` is set
    /// 4. Run the validate-token extension
    /// 5. Apply expiry and audience checks
    ///
    /// Skipping at any extension point yields
    /// [`AuthenticateOutcome::NotAttempted`]. Handling at any extension point
    /// returns the extension's ticket as final, or
    /// [`FailureReason::RejectedByExtension`] when it left none.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unprotect`] when the unprotection primitive fails
    /// for infrastructure reasons. Rejected credentials are never errors.
    pub async fn authenticate(
        &self,
        request: &dyn HttpRequest,
    ) -> Result<AuthenticateOutcome, AuthError> {
        let options = self.options.as_ref();
        let header_token = token_extractor::extract(request);

        let token = match event_pipeline::retrieve_token(options, request, header_token).await {
            ExtensionOutcome::Continue(token) => token,
            ExtensionOutcome::Handled(ticket) => {
                tracing::debug!("authentication handled by retrieve-token extension");
                return Ok(handled(ticket));
            }
            ExtensionOutcome::Skipped => {
                tracing::debug!("authentication skipped by retrieve-token extension");
                return Ok(AuthenticateOutcome::NotAttempted);
            }
        };

        let resolved = ticket_resolver::resolve(options.unprotector(), token.as_deref())
            .map_err(|e| {
                tracing::error!(error = %e, "ticket unprotection failed");
                AuthError::Unprotect(e)
            })?;

        let mut ticket = match resolved {
            ValidationOutcome::Success(ticket) => ticket,
            ValidationOutcome::Failure(reason) => return Ok(failed(reason)),
        };

        // resolve() only succeeds for a non-empty token
        let token = token.unwrap_or_default();

        if options.save_token() {
            ticket.properties.set(PROPERTY_ACCESS_TOKEN, token.as_str());
        }

        let ticket = match event_pipeline::validate_token(options, &token, ticket).await {
            ExtensionOutcome::Continue(Some(ticket)) => ticket,
            ExtensionOutcome::Continue(None) => {
                return Ok(failed(FailureReason::RejectedByExtension));
            }
            ExtensionOutcome::Handled(ticket) => {
                tracing::debug!("authentication handled by validate-token extension");
                return Ok(handled(ticket));
            }
            ExtensionOutcome::Skipped => {
                tracing::debug!("authentication skipped by validate-token extension");
                return Ok(AuthenticateOutcome::NotAttempted);
            }
        };

        let outcome = policy_validator::validate(ticket, options.audiences(), self.clock.now());
        match outcome {
            ValidationOutcome::Success(ticket) => {
                tracing::debug!(subject = ?ticket.subject(), "bearer token authenticated");
                Ok(AuthenticateOutcome::Authenticated(ticket))
            }
            ValidationOutcome::Failure(reason) => Ok(failed(reason)),
        }
    }

    /// Builds the challenge for an unauthenticated request.
    ///
    /// `failure` is the reason returned by a prior `authenticate`, or `None`
    /// when the challenge is issued directly. Explicit `.error`,
    /// `.error_description`, `.error_uri`, `.realm`, and `.scope` entries in
    /// `properties` override inferred values; the apply-challenge extension
    /// sees the merged fields and has the last word.
    pub async fn challenge(
        &self,
        failure: Option<FailureReason>,
        properties: &AuthenticationProperties,
    ) -> ChallengeOutcome {
        let options = self.options.as_ref();

        let mut fields = error_classifier::seed_fields(failure, options.include_error_details());
        fields.merge_properties(properties);

        match event_pipeline::apply_challenge(options, properties, failure, fields).await {
            ExtensionOutcome::Continue(fields) => ChallengeOutcome::Unauthorized {
                www_authenticate: challenge_builder::build(&fields, options.realm()),
            },
            ExtensionOutcome::Handled(response) => {
                tracing::debug!(status = response.status, "challenge handled by extension");
                ChallengeOutcome::Handled(response)
            }
            ExtensionOutcome::Skipped => {
                tracing::debug!("challenge skipped by extension");
                ChallengeOutcome::Skipped
            }
        }
    }
}

fn handled(ticket: Option<Ticket>) -> AuthenticateOutcome {
    match ticket {
        Some(ticket) => AuthenticateOutcome::Authenticated(ticket),
        None => failed(FailureReason::RejectedByExtension),
    }
}

fn failed(reason: FailureReason) -> AuthenticateOutcome {
    match reason {
        FailureReason::Missing => tracing::debug!("no bearer token presented"),
        reason => tracing::warn!(%reason, "bearer token rejected"),
    }
    AuthenticateOutcome::Failed(reason)
}
