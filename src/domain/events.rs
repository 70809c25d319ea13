//! Extension points of the bearer authentication pipeline.
//!
//! Each extension point receives a mutable context. Leaving the context's
//! action untouched continues the pipeline with whatever values the
//! extension left on it. Calling [`handle_response`] or
//! [`skip_to_next_middleware`] stops the surrounding stage. Only the first
//! such call within one invocation counts.
//!
//! [`handle_response`]: RetrieveTokenContext::handle_response
//! [`skip_to_next_middleware`]: RetrieveTokenContext::skip_to_next_middleware

use async_trait::async_trait;

use crate::domain::challenge::ChallengeFields;
use crate::domain::entities::{AuthenticationProperties, Ticket};
use crate::domain::options::AuthenticationOptions;
use crate::domain::outcome::{FailureReason, HandledResponse};
use crate::domain::ports::HttpRequest;

/// Short-circuit requested by an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    HandleResponse,
    SkipToNextMiddleware,
}

/// First-call-wins holder for the action of one invocation.
#[derive(Debug, Default)]
struct ActionSlot(Option<EventAction>);

impl ActionSlot {
    fn record(&mut self, action: EventAction) {
        match self.0 {
            None => self.0 = Some(action),
            Some(first) => {
                tracing::debug!(?first, ignored = ?action, "extension action already recorded")
            }
        }
    }
}

/// Context of the token retrieval extension point.
///
/// `token` starts as the value found in the `Authorization` header.
pub struct RetrieveTokenContext<'a> {
    request: &'a dyn HttpRequest,
    options: &'a AuthenticationOptions,
    /// Token to resolve. Replace it or clear it as needed.
    pub token: Option<String>,
    /// Final ticket used when the extension calls `handle_response`.
    pub ticket: Option<Ticket>,
    action: ActionSlot,
}

impl<'a> RetrieveTokenContext<'a> {
    pub fn new(
        request: &'a dyn HttpRequest,
        options: &'a AuthenticationOptions,
        token: Option<String>,
    ) -> Self {
        Self {
            request,
            options,
            token,
            ticket: None,
            action: ActionSlot::default(),
        }
    }

    pub fn request(&self) -> &dyn HttpRequest {
        self.request
    }

    pub fn options(&self) -> &AuthenticationOptions {
        self.options
    }

    /// Stops authentication; `ticket` becomes the final result.
    pub fn handle_response(&mut self) {
        self.action.record(EventAction::HandleResponse);
    }

    /// Stops authentication and reports it as not attempted.
    pub fn skip_to_next_middleware(&mut self) {
        self.action.record(EventAction::SkipToNextMiddleware);
    }

    pub fn action(&self) -> Option<EventAction> {
        self.action.0
    }
}

/// Context of the ticket validation extension point.
pub struct ValidateTokenContext<'a> {
    options: &'a AuthenticationOptions,
    token: &'a str,
    /// Resolved ticket. Replace it, or clear it to reject the request.
    pub ticket: Option<Ticket>,
    action: ActionSlot,
}

impl<'a> ValidateTokenContext<'a> {
    pub fn new(options: &'a AuthenticationOptions, token: &'a str, ticket: Ticket) -> Self {
        Self {
            options,
            token,
            ticket: Some(ticket),
            action: ActionSlot::default(),
        }
    }

    pub fn options(&self) -> &AuthenticationOptions {
        self.options
    }

    /// Raw token the ticket was resolved from.
    pub fn token(&self) -> &str {
        self.token
    }

    /// Skips expiry and audience checks; `ticket` becomes the final result.
    pub fn handle_response(&mut self) {
        self.action.record(EventAction::HandleResponse);
    }

    pub fn skip_to_next_middleware(&mut self) {
        self.action.record(EventAction::SkipToNextMiddleware);
    }

    pub fn action(&self) -> Option<EventAction> {
        self.action.0
    }
}

/// Context of the challenge extension point.
pub struct ApplyChallengeContext<'a> {
    options: &'a AuthenticationOptions,
    properties: &'a AuthenticationProperties,
    failure: Option<FailureReason>,
    /// Parameters rendered into the `WWW-Authenticate` header.
    pub fields: ChallengeFields,
    /// Response honoured when the extension calls `handle_response`.
    pub response: HandledResponse,
    action: ActionSlot,
}

impl<'a> ApplyChallengeContext<'a> {
    pub fn new(
        options: &'a AuthenticationOptions,
        properties: &'a AuthenticationProperties,
        failure: Option<FailureReason>,
        fields: ChallengeFields,
    ) -> Self {
        Self {
            options,
            properties,
            failure,
            fields,
            response: HandledResponse::default(),
            action: ActionSlot::default(),
        }
    }

    pub fn options(&self) -> &AuthenticationOptions {
        self.options
    }

    /// Properties supplied by the host for this challenge.
    pub fn properties(&self) -> &AuthenticationProperties {
        self.properties
    }

    /// Failure that triggered the challenge, if any.
    pub fn failure(&self) -> Option<FailureReason> {
        self.failure
    }

    /// Stops the challenge; only `response` is written.
    pub fn handle_response(&mut self) {
        self.action.record(EventAction::HandleResponse);
    }

    /// Stops the challenge without writing anything.
    pub fn skip_to_next_middleware(&mut self) {
        self.action.record(EventAction::SkipToNextMiddleware);
    }

    pub fn action(&self) -> Option<EventAction> {
        self.action.0
    }
}

/// Callbacks invoked at the three extension points.
///
/// Every method defaults to a no-op, so implementors override only what they
/// need. Implementations are shared by all requests and must not keep
/// per-request state.
///
/// # Example
///
/// ```rust,ignore
/// struct QueryStringToken;
///
/// #[async_trait]
/// impl BearerEvents for QueryStringToken {
///     async fn on_retrieve_token(&self, context: &mut RetrieveTokenContext<'_>) {
///         if context.token.is_none() {
///             context.token = context.request().query_param("access_token").map(str::to_owned);
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait BearerEvents: Send + Sync {
    /// Runs before the token is resolved.
    async fn on_retrieve_token(&self, _context: &mut RetrieveTokenContext<'_>) {}

    /// Runs after the token was resolved into a ticket, before policy checks.
    async fn on_validate_token(&self, _context: &mut ValidateTokenContext<'_>) {}

    /// Runs before the challenge header is rendered.
    async fn on_apply_challenge(&self, _context: &mut ApplyChallengeContext<'_>) {}
}

/// Extension callbacks that never act.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl BearerEvents for NoopEvents {}
