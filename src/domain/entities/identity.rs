//! Identity entity: an ordered multi-map of claims.

use serde::{Deserialize, Serialize};

/// Claim type used for the subject of a ticket.
pub const CLAIM_SUBJECT: &str = "sub";

/// Claim type used for granted scopes. May repeat.
pub const CLAIM_SCOPE: &str = "scope";

/// A single claim carried by an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    /// Creates a new claim.
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// Authenticated identity carried by a ticket.
///
/// Claims keep their insertion order and a claim type may appear more than
/// once (e.g. one `scope` claim per granted scope).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    claims: Vec<Claim>,
}

impl Identity {
    /// Creates an empty identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a claim, consuming and returning the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use bearer_gate::domain::entities::Identity;
    ///
    /// let identity = Identity::new()
    ///     .with_claim("sub", "Fabrikam")
    ///     .with_claim("scope", "read");
    ///
    /// assert_eq!(identity.name(), Some("Fabrikam"));
    /// ```
    pub fn with_claim(mut self, claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_claim(claim_type, value);
        self
    }

    /// Appends a claim.
    pub fn add_claim(&mut self, claim_type: impl Into<String>, value: impl Into<String>) {
        self.claims.push(Claim::new(claim_type, value));
    }

    /// All claims in insertion order.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Returns the value of the first claim with the given type.
    pub fn find_first(&self, claim_type: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    /// Returns every value recorded for the given claim type, in order.
    pub fn find_all<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.value.as_str())
    }

    pub fn has_claim(&self, claim_type: &str, value: &str) -> bool {
        self.claims
            .iter()
            .any(|c| c.claim_type == claim_type && c.value == value)
    }

    /// Subject of the identity (first `sub` claim).
    pub fn name(&self) -> Option<&str> {
        self.find_first(CLAIM_SUBJECT)
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
