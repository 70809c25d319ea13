//! Fields rendered into a `WWW-Authenticate` challenge.

use crate::domain::entities::AuthenticationProperties;
use crate::domain::entities::properties::{
    PROPERTY_ERROR, PROPERTY_ERROR_DESCRIPTION, PROPERTY_ERROR_URI, PROPERTY_REALM,
    PROPERTY_SCOPE,
};

/// Optional challenge parameters, assembled fresh for every challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeFields {
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub error_uri: Option<String>,
    pub realm: Option<String>,
    pub scope: Option<String>,
}

impl ChallengeFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays the explicit overrides found in a property bag.
    ///
    /// Only keys present with a non-empty value replace the current field.
    pub fn merge_properties(&mut self, properties: &AuthenticationProperties) {
        let overlay = |slot: &mut Option<String>, key: &str| {
            if let Some(value) = properties.get(key).filter(|v| !v.is_empty()) {
                *slot = Some(value.to_string());
            }
        };

        overlay(&mut self.error, PROPERTY_ERROR);
        overlay(&mut self.error_description, PROPERTY_ERROR_DESCRIPTION);
        overlay(&mut self.error_uri, PROPERTY_ERROR_URI);
        overlay(&mut self.realm, PROPERTY_REALM);
        overlay(&mut self.scope, PROPERTY_SCOPE);
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.error,
            &self.error_description,
            &self.error_uri,
            &self.realm,
            &self.scope,
        ]
        .iter()
        .all(|f| f.as_deref().is_none_or(str::is_empty))
    }
}
