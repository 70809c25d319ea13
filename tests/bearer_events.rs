mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use bearer_gate::domain::entities::{Identity, Ticket};
use bearer_gate::domain::events::{
    ApplyChallengeContext, BearerEvents, RetrieveTokenContext, ValidateTokenContext,
};
use std::sync::Arc;

/// Falls back to the `access_token` query parameter.
struct QueryStringToken;

#[async_trait]
impl BearerEvents for QueryStringToken {
    async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
        if context.token.is_none() {
            context.token = context
                .request()
                .query_param("access_token")
                .map(str::to_owned);
        }
    }
}

struct SkipAuthentication;

#[async_trait]
impl BearerEvents for SkipAuthentication {
    async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
        context.skip_to_next_middleware();
    }
}

/// Authenticates every request as a fixed service identity.
struct ServiceIdentity;

#[async_trait]
impl BearerEvents for ServiceIdentity {
    async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
        context.ticket = Some(Ticket::new(
            Identity::new().with_claim("sub", "service"),
            Default::default(),
        ));
        context.handle_response();
    }
}

/// Rejects tickets for the `mallory` subject.
struct DenySubject;

#[async_trait]
impl BearerEvents for DenySubject {
    async fn on_validate_token(&self, context: &mut ValidateTokenContext<'_>) {
        if context.ticket.as_ref().and_then(Ticket::subject) == Some("mallory") {
            context.ticket = None;
        }
    }
}

/// Accepts only tickets that carry the raw token they came from.
struct RequireSavedToken;

#[async_trait]
impl BearerEvents for RequireSavedToken {
    async fn on_validate_token(&self, context: &mut ValidateTokenContext<'_>) {
        let saved = context
            .ticket
            .as_ref()
            .and_then(|t| t.properties.access_token())
            == Some(context.token());
        if !saved {
            context.ticket = None;
        }
    }
}

struct CustomChallenge;

#[async_trait]
impl BearerEvents for CustomChallenge {
    async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
        context.response.status = 403;
        context
            .response
            .headers
            .push(("x-auth-failure".to_string(), "custom".to_string()));
        context.response.body = "access denied".to_string();
        context.handle_response();
    }
}

struct SuppressChallenge;

#[async_trait]
impl BearerEvents for SuppressChallenge {
    async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
        context.skip_to_next_middleware();
    }
}

struct ScopedChallenge;

#[async_trait]
impl BearerEvents for ScopedChallenge {
    async fn on_apply_challenge(&self, context: &mut ApplyChallengeContext<'_>) {
        context.fields.realm = Some("custom_realm".to_string());
        context.fields.scope = Some("orders.read".to_string());
        context.fields.error_uri = Some("https://example.com/errors".to_string());
    }
}

fn server_with(events: impl BearerEvents + 'static) -> axum_test::TestServer {
    common::create_test_server(common::create_test_state(|b| {
        b.realm("default_realm").events(Arc::new(events))
    }))
}

#[tokio::test]
async fn test_token_from_query_string() {
    let server = server_with(QueryStringToken);

    let response = server
        .get("/api/me")
        .add_query_param("access_token", common::valid_token("alice"))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["subject"], "alice");
}

#[tokio::test]
async fn test_header_token_wins_over_query_string() {
    let server = server_with(QueryStringToken);

    let response = server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&common::valid_token("alice")))
        .add_query_param("access_token", "garbage")
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_skipped_authentication_reaches_handler_without_ticket() {
    let server = server_with(SkipAuthentication);

    let response = server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&common::valid_token("alice")))
        .await;

    // rejected by the extractor, not challenged
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("www-authenticate").is_none());
}

#[tokio::test]
async fn test_extension_supplied_ticket_is_final() {
    let server = server_with(ServiceIdentity);

    let response = server.get("/api/me").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["subject"], "service");
}

#[tokio::test]
async fn test_cleared_ticket_is_rejected_without_inferred_error() {
    let server = server_with(DenySubject);

    let response = server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&common::valid_token("mallory")))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        r#"Bearer realm="default_realm""#
    );

    server
        .get("/api/me")
        .add_header("Authorization", common::bearer(&common::valid_token("alice")))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_saved_token_is_visible_to_validation() {
    let saving = common::create_test_server(common::create_test_state(|b| {
        b.save_token(true).events(Arc::new(RequireSavedToken))
    }));
    let not_saving = common::create_test_server(common::create_test_state(|b| {
        b.events(Arc::new(RequireSavedToken))
    }));
    let header = common::bearer(&common::valid_token("alice"));

    saving
        .get("/api/me")
        .add_header("Authorization", header.clone())
        .await
        .assert_status_ok();

    not_saving
        .get("/api/me")
        .add_header("Authorization", header)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extension_written_challenge_response() {
    let server = server_with(CustomChallenge);

    let response = server.get("/api/me").await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.headers().get("x-auth-failure").unwrap(), "custom");
    assert!(response.headers().get("www-authenticate").is_none());
    assert_eq!(response.text(), "access denied");
}

#[tokio::test]
async fn test_suppressed_challenge_passes_request_through() {
    let server = server_with(SuppressChallenge);

    let response = server.get("/api/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert!(response.headers().get("www-authenticate").is_none());
}

#[tokio::test]
async fn test_challenge_fields_edited_by_extension() {
    let server = server_with(ScopedChallenge);

    let response = server.get("/api/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get("www-authenticate").unwrap(),
        r#"Bearer realm="custom_realm", error="invalid_token", error_description="The access token is not valid.", error_uri="https://example.com/errors", scope="orders.read""#
    );
}
