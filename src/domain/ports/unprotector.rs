//! Port for the token unprotection primitive.

use thiserror::Error;

use crate::domain::entities::Ticket;

/// Infrastructure fault raised while unprotecting a token.
///
/// A token that simply fails to decode is *not* an error; implementations
/// report it as `Ok(None)`. This type is reserved for faults the host should
/// answer with a 5xx.
#[derive(Debug, Error)]
pub enum UnprotectError {
    #[error("invalid key material: {0}")]
    Key(String),
    #[error("unprotection backend unavailable: {0}")]
    Unavailable(String),
    #[error("ticket serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Converts an opaque token string into a [`Ticket`].
///
/// # Returns
///
/// - `Ok(Some(ticket))` if the token was produced by this primitive
/// - `Ok(None)` if the token is malformed, tampered with, or unknown
///
/// # Implementations
///
/// - [`crate::infrastructure::format::HmacTicketFormat`] - HMAC-SHA256 signed JSON tickets
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait TicketUnprotector: Send + Sync {
    /// Unprotects a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`UnprotectError`] on infrastructure failures only.
    fn unprotect(&self, token: &str) -> Result<Option<Ticket>, UnprotectError>;
}
