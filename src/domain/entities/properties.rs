//! Authentication property bag attached to tickets and challenges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expiry timestamp of a ticket.
pub const PROPERTY_EXPIRES: &str = ".expires";
/// Issue timestamp of a ticket.
pub const PROPERTY_ISSUED: &str = ".issued";
/// JSON array of audiences the ticket was issued for.
pub const PROPERTY_AUDIENCES: &str = ".audiences";
/// JSON array of scopes granted to the ticket.
pub const PROPERTY_SCOPES: &str = ".scopes";
/// Raw access token, stored when token persistence is enabled.
pub const PROPERTY_ACCESS_TOKEN: &str = "access_token";

/// Challenge override: `error` parameter.
pub const PROPERTY_ERROR: &str = ".error";
/// Challenge override: `error_description` parameter.
pub const PROPERTY_ERROR_DESCRIPTION: &str = ".error_description";
/// Challenge override: `error_uri` parameter.
pub const PROPERTY_ERROR_URI: &str = ".error_uri";
/// Challenge override: `realm` parameter.
pub const PROPERTY_REALM: &str = ".realm";
/// Challenge override: `scope` parameter.
pub const PROPERTY_SCOPE: &str = ".scope";

/// Ordered string-keyed property bag.
///
/// Keys are unique; setting an existing key replaces its value in place so
/// the original insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationProperties {
    items: Vec<(String, String)>,
}

impl AuthenticationProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, consuming and returning the bag.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.items.push((key, value)),
        }
    }

    /// Removes a property and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let pos = self.items.iter().position(|(k, _)| k == key)?;
        Some(self.items.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parsed expiry timestamp.
    ///
    /// Accepts RFC 3339 and RFC 2822 (`Tue, 1 Jul 2003 10:52:37 GMT`) text.
    /// An unparseable value reads as `None`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.get(PROPERTY_EXPIRES).and_then(parse_timestamp)
    }

    pub fn set_expires_at(&mut self, at: DateTime<Utc>) {
        self.set(PROPERTY_EXPIRES, at.to_rfc3339());
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.get(PROPERTY_ISSUED).and_then(parse_timestamp)
    }

    pub fn set_issued_at(&mut self, at: DateTime<Utc>) {
        self.set(PROPERTY_ISSUED, at.to_rfc3339());
    }

    /// Audiences listed in the ticket. Absent or unparseable reads as empty.
    pub fn audiences(&self) -> Vec<String> {
        self.get(PROPERTY_AUDIENCES)
            .map(parse_string_array)
            .unwrap_or_default()
    }

    pub fn set_audiences<I, S>(&mut self, audiences: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(PROPERTY_AUDIENCES, to_json_array(audiences));
    }

    /// Scopes listed in the ticket. Absent or unparseable reads as empty.
    pub fn scopes(&self) -> Vec<String> {
        self.get(PROPERTY_SCOPES)
            .map(parse_string_array)
            .unwrap_or_default()
    }

    pub fn set_scopes<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(PROPERTY_SCOPES, to_json_array(scopes));
    }

    /// Raw access token saved by the authentication pipeline.
    pub fn access_token(&self) -> Option<&str> {
        self.get(PROPERTY_ACCESS_TOKEN)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

fn parse_string_array(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

fn to_json_array<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    serde_json::Value::from(values).to_string()
}
