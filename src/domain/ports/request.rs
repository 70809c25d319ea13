//! Narrow view of the incoming HTTP request.

use axum::http::request::Parts;

/// Read-only request capability handed to the authentication pipeline.
///
/// Keeps the core independent of any particular host framework; the axum glue
/// implements it for [`Parts`].
pub trait HttpRequest: Send + Sync {
    /// Returns the first value of a header, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Raw query string, without the leading `?`.
    fn query(&self) -> Option<&str>;

    /// Returns the value of a query parameter, undecoded.
    fn query_param(&self, name: &str) -> Option<&str> {
        self.query()?.split('&').find_map(|pair| {
            let mut parts = pair.splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) if key == name => Some(value),
                _ => None,
            }
        })
    }
}

impl HttpRequest for Parts {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn query(&self) -> Option<&str> {
        self.uri.query()
    }
}
