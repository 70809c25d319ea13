//! Authentication options, built once at startup and frozen afterwards.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::events::{BearerEvents, NoopEvents};
use crate::domain::ports::TicketUnprotector;

/// Default authentication scheme name.
pub const DEFAULT_SCHEME: &str = "Bearer";

/// Process-wide configuration of the bearer authentication handler.
///
/// Constructed through [`AuthenticationOptions::builder`]; no setters exist
/// on the built value, so it can be shared across requests behind an `Arc`
/// without synchronization.
pub struct AuthenticationOptions {
    audiences: HashSet<String>,
    include_error_details: bool,
    realm: Option<String>,
    save_token: bool,
    authentication_scheme: String,
    unprotector: Arc<dyn TicketUnprotector>,
    events: Arc<dyn BearerEvents>,
}

impl AuthenticationOptions {
    /// Starts building options around the given unprotection primitive.
    pub fn builder(unprotector: Arc<dyn TicketUnprotector>) -> AuthenticationOptionsBuilder {
        AuthenticationOptionsBuilder {
            audiences: HashSet::new(),
            include_error_details: true,
            realm: None,
            save_token: false,
            authentication_scheme: DEFAULT_SCHEME.to_string(),
            unprotector,
            events: Arc::new(NoopEvents),
        }
    }

    /// Acceptable audiences. Empty means any audience is accepted.
    pub fn audiences(&self) -> &HashSet<String> {
        &self.audiences
    }

    pub fn include_error_details(&self) -> bool {
        self.include_error_details
    }

    /// Default realm used when no challenge sets one explicitly.
    pub fn realm(&self) -> Option<&str> {
        self.realm.as_deref()
    }

    pub fn save_token(&self) -> bool {
        self.save_token
    }

    pub fn authentication_scheme(&self) -> &str {
        &self.authentication_scheme
    }

    pub fn unprotector(&self) -> &dyn TicketUnprotector {
        self.unprotector.as_ref()
    }

    pub fn events(&self) -> &dyn BearerEvents {
        self.events.as_ref()
    }
}

impl fmt::Debug for AuthenticationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationOptions")
            .field("audiences", &self.audiences)
            .field("include_error_details", &self.include_error_details)
            .field("realm", &self.realm)
            .field("save_token", &self.save_token)
            .field("authentication_scheme", &self.authentication_scheme)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AuthenticationOptions`].
pub struct AuthenticationOptionsBuilder {
    audiences: HashSet<String>,
    include_error_details: bool,
    realm: Option<String>,
    save_token: bool,
    authentication_scheme: String,
    unprotector: Arc<dyn TicketUnprotector>,
    events: Arc<dyn BearerEvents>,
}

impl AuthenticationOptionsBuilder {
    /// Adds one acceptable audience.
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audiences.insert(audience.into());
        self
    }

    /// Adds several acceptable audiences. Empty strings are ignored.
    pub fn audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audiences.extend(
            audiences
                .into_iter()
                .map(Into::into)
                .filter(|a: &String| !a.is_empty()),
        );
        self
    }

    pub fn include_error_details(mut self, include: bool) -> Self {
        self.include_error_details = include;
        self
    }

    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        let realm = realm.into();
        self.realm = (!realm.is_empty()).then_some(realm);
        self
    }

    pub fn save_token(mut self, save: bool) -> Self {
        self.save_token = save;
        self
    }

    pub fn authentication_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.authentication_scheme = scheme.into();
        self
    }

    /// Installs the extension callbacks.
    pub fn events(mut self, events: Arc<dyn BearerEvents>) -> Self {
        self.events = events;
        self
    }

    /// Freezes the options.
    pub fn build(self) -> AuthenticationOptions {
        AuthenticationOptions {
            audiences: self.audiences,
            include_error_details: self.include_error_details,
            realm: self.realm,
            save_token: self.save_token,
            authentication_scheme: self.authentication_scheme,
            unprotector: self.unprotector,
            events: self.events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTicketUnprotector;

    fn unprotector() -> Arc<dyn TicketUnprotector> {
        Arc::new(MockTicketUnprotector::new())
    }

    #[test]
    fn test_builder_defaults() {
        let options = AuthenticationOptions::builder(unprotector()).build();

        assert!(options.audiences().is_empty());
        assert!(options.include_error_details());
        assert!(options.realm().is_none());
        assert!(!options.save_token());
        assert_eq!(options.authentication_scheme(), "Bearer");
    }

    #[test]
    fn test_builder_collects_audiences() {
        let options = AuthenticationOptions::builder(unprotector())
            .audience("http://www.fabrikam.com/")
            .audiences(["http://www.contoso.com/", ""])
            .build();

        assert_eq!(options.audiences().len(), 2);
        assert!(options.audiences().contains("http://www.contoso.com/"));
    }

    #[test]
    fn test_empty_realm_is_unset() {
        let options = AuthenticationOptions::builder(unprotector())
            .realm("")
            .build();
        assert!(options.realm().is_none());

        let options = AuthenticationOptions::builder(unprotector())
            .realm("resource_server")
            .build();
        assert_eq!(options.realm(), Some("resource_server"));
    }
}
