//! Runs the three extension points and folds each into an [`ExtensionOutcome`].

use crate::domain::challenge::ChallengeFields;
use crate::domain::entities::{AuthenticationProperties, Ticket};
use crate::domain::events::{
    ApplyChallengeContext, EventAction, RetrieveTokenContext, ValidateTokenContext,
};
use crate::domain::options::AuthenticationOptions;
use crate::domain::outcome::{ExtensionOutcome, FailureReason, HandledResponse};
use crate::domain::ports::HttpRequest;

/// Runs the token retrieval extension point.
///
/// `Continue` carries the token to resolve; `Handled` carries the final ticket.
pub async fn retrieve_token(
    options: &AuthenticationOptions,
    request: &dyn HttpRequest,
    token: Option<String>,
) -> ExtensionOutcome<Option<String>, Option<Ticket>> {
    let mut context = RetrieveTokenContext::new(request, options, token);
    options.events().on_retrieve_token(&mut context).await;

    match context.action() {
        None => ExtensionOutcome::Continue(context.token.filter(|t| !t.is_empty())),
        Some(EventAction::HandleResponse) => ExtensionOutcome::Handled(context.ticket),
        Some(EventAction::SkipToNextMiddleware) => ExtensionOutcome::Skipped,
    }
}

/// Runs the ticket validation extension point.
///
/// `Continue` carries the ticket to submit to policy checks; `Handled`
/// carries the final ticket. Either may be `None` if the extension cleared it.
pub async fn validate_token(
    options: &AuthenticationOptions,
    token: &str,
    ticket: Ticket,
) -> ExtensionOutcome<Option<Ticket>> {
    let mut context = ValidateTokenContext::new(options, token, ticket);
    options.events().on_validate_token(&mut context).await;

    match context.action() {
        None => ExtensionOutcome::Continue(context.ticket),
        Some(EventAction::HandleResponse) => ExtensionOutcome::Handled(context.ticket),
        Some(EventAction::SkipToNextMiddleware) => ExtensionOutcome::Skipped,
    }
}

/// Runs the challenge extension point.
///
/// `Continue` carries the fields to render; `Handled` carries the response
/// the extension wrote.
pub async fn apply_challenge(
    options: &AuthenticationOptions,
    properties: &AuthenticationProperties,
    failure: Option<FailureReason>,
    fields: ChallengeFields,
) -> ExtensionOutcome<ChallengeFields, HandledResponse> {
    let mut context = ApplyChallengeContext::new(options, properties, failure, fields);
    options.events().on_apply_challenge(&mut context).await;

    match context.action() {
        None => ExtensionOutcome::Continue(context.fields),
        Some(EventAction::HandleResponse) => ExtensionOutcome::Handled(context.response),
        Some(EventAction::SkipToNextMiddleware) => ExtensionOutcome::Skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Identity;
    use crate::domain::events::BearerEvents;
    use crate::domain::ports::MockTicketUnprotector;
    use async_trait::async_trait;
    use axum::http::Request;
    use std::sync::Arc;

    fn options_with(events: impl BearerEvents + 'static) -> AuthenticationOptions {
        AuthenticationOptions::builder(Arc::new(MockTicketUnprotector::new()))
            .events(Arc::new(events))
            .build()
    }

    fn request() -> axum::http::request::Parts {
        Request::builder().body(()).unwrap().into_parts().0
    }

    struct ReplaceToken;

    #[async_trait]
    impl BearerEvents for ReplaceToken {
        async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
            context.token = Some("replaced".to_string());
        }
    }

    struct ClearToken;

    #[async_trait]
    impl BearerEvents for ClearToken {
        async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
            context.token = Some(String::new());
        }
    }

    struct HandleWithTicket;

    #[async_trait]
    impl BearerEvents for HandleWithTicket {
        async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
            context.ticket = Some(Ticket::new(
                Identity::new().with_claim("sub", "Contoso"),
                Default::default(),
            ));
            context.handle_response();
            context.skip_to_next_middleware();
        }

        async fn on_validate_token(&self, context: &mut ValidateTokenContext<'_>) {
            context.ticket = None;
            context.handle_response();
        }

        async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
            context.response.status = 403;
            context.response.body = "custom".to_string();
            context.handle_response();
        }
    }

    struct SkipEverything;

    #[async_trait]
    impl BearerEvents for SkipEverything {
        async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
            context.skip_to_next_middleware();
            context.handle_response();
        }

        async fn on_validate_token(&self, context: &mut ValidateTokenContext<'_>) {
            context.skip_to_next_middleware();
        }

        async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
            context.skip_to_next_middleware();
        }
    }

    struct EditFields;

    #[async_trait]
    impl BearerEvents for EditFields {
        async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
            context.fields.scope = Some("read".to_string());
        }
    }

    #[tokio::test]
    async fn test_default_events_continue_unchanged() {
        let options = options_with(crate::domain::events::NoopEvents);
        let parts = request();

        let outcome = retrieve_token(&options, &parts, Some("token".to_string())).await;
        assert_eq!(outcome, ExtensionOutcome::Continue(Some("token".to_string())));

        let ticket = Ticket::default();
        let outcome = validate_token(&options, "token", ticket.clone()).await;
        assert_eq!(outcome, ExtensionOutcome::Continue(Some(ticket)));

        let outcome = apply_challenge(
            &options,
            &AuthenticationProperties::new(),
            None,
            ChallengeFields::new(),
        )
        .await;
        assert_eq!(outcome, ExtensionOutcome::Continue(ChallengeFields::new()));
    }

    #[tokio::test]
    async fn test_retrieve_token_replacement() {
        let options = options_with(ReplaceToken);
        let parts = request();

        let outcome = retrieve_token(&options, &parts, None).await;
        assert_eq!(outcome, ExtensionOutcome::Continue(Some("replaced".to_string())));
    }

    #[tokio::test]
    async fn test_cleared_token_continues_as_absent() {
        let options = options_with(ClearToken);
        let parts = request();

        let outcome = retrieve_token(&options, &parts, Some("token".to_string())).await;
        assert_eq!(outcome, ExtensionOutcome::Continue(None));
    }

    #[tokio::test]
    async fn test_handle_response_carries_context_values() {
        let options = options_with(HandleWithTicket);
        let parts = request();

        match retrieve_token(&options, &parts, None).await {
            ExtensionOutcome::Handled(Some(ticket)) => {
                assert_eq!(ticket.subject(), Some("Contoso"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let outcome = validate_token(&options, "token", Ticket::default()).await;
        assert_eq!(outcome, ExtensionOutcome::Handled(None));

        match apply_challenge(
            &options,
            &AuthenticationProperties::new(),
            Some(FailureReason::Malformed),
            ChallengeFields::new(),
        )
        .await
        {
            ExtensionOutcome::Handled(response) => {
                assert_eq!(response.status, 403);
                assert_eq!(response.body, "custom");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_skip_short_circuits_every_point() {
        let options = options_with(SkipEverything);
        let parts = request();

        assert_eq!(
            retrieve_token(&options, &parts, Some("token".to_string())).await,
            ExtensionOutcome::Skipped
        );
        assert_eq!(
            validate_token(&options, "token", Ticket::default()).await,
            ExtensionOutcome::Skipped
        );
        assert_eq!(
            apply_challenge(
                &options,
                &AuthenticationProperties::new(),
                None,
                ChallengeFields::new()
            )
            .await,
            ExtensionOutcome::Skipped
        );
    }

    #[tokio::test]
    async fn test_challenge_fields_edited_in_place() {
        let options = options_with(EditFields);

        let outcome = apply_challenge(
            &options,
            &AuthenticationProperties::new(),
            None,
            ChallengeFields::new(),
        )
        .await;

        match outcome {
            ExtensionOutcome::Continue(fields) => assert_eq!(fields.scope.as_deref(), Some("read")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
