//! HMAC-SHA256 signed ticket format.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::entities::Ticket;
use crate::domain::ports::{TicketUnprotector, UnprotectError};

type HmacSha256 = Hmac<Sha256>;

/// Ticket format signed with a server-side secret.
///
/// # Token Layout
///
/// ```text
/// base64url(json(ticket)) "." hex(hmac_sha256(secret, base64url(json(ticket))))
/// ```
///
/// The payload is not encrypted: claims are readable by anyone holding the
/// token, but cannot be altered without the secret.
pub struct HmacTicketFormat {
    signing_secret: String,
}

impl HmacTicketFormat {
    /// Creates a format keyed by `signing_secret`.
    ///
    /// The secret must match the one used by whoever protected the tickets.
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, UnprotectError> {
        HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .map_err(|e| UnprotectError::Key(e.to_string()))
    }

    /// Serializes and signs a ticket.
    ///
    /// # Errors
    ///
    /// Returns [`UnprotectError::Serialization`] if the ticket cannot be encoded.
    pub fn protect(&self, ticket: &Ticket) -> Result<String, UnprotectError> {
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(ticket)?);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{payload}.{signature}"))
    }
}

impl TicketUnprotector for HmacTicketFormat {
    fn unprotect(&self, token: &str) -> Result<Option<Ticket>, UnprotectError> {
        let Some((payload, signature)) = token.split_once('.') else {
            return Ok(None);
        };

        let Ok(signature) = hex::decode(signature) else {
            return Ok(None);
        };

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            tracing::debug!("ticket signature mismatch");
            return Ok(None);
        }

        let ticket = URL_SAFE_NO_PAD
            .decode(payload)
            .ok()
            .and_then(|bytes| serde_json::from_slice::<Ticket>(&bytes).ok());

        if ticket.is_none() {
            tracing::debug!("signed ticket payload could not be decoded");
        }

        Ok(ticket)
    }
}
