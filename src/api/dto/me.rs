//! DTOs for the authenticated caller endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Ticket;

/// Identity of the authenticated caller.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub subject: Option<String>,
    pub claims: Vec<ClaimDto>,
    pub scopes: Vec<String>,
    pub audiences: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ClaimDto {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl From<&Ticket> for MeResponse {
    fn from(ticket: &Ticket) -> Self {
        Self {
            subject: ticket.subject().map(str::to_owned),
            claims: ticket
                .identity
                .claims()
                .iter()
                .map(|c| ClaimDto {
                    claim_type: c.claim_type.clone(),
                    value: c.value.clone(),
                })
                .collect(),
            scopes: ticket.properties.scopes(),
            audiences: ticket.properties.audiences(),
            expires_at: ticket.properties.expires_at(),
        }
    }
}
