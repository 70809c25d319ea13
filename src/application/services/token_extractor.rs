//! Locates a bearer token in the `Authorization` header.

use crate::domain::ports::HttpRequest;

const AUTHORIZATION: &str = "authorization";
const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `Authorization` header value.
///
/// The scheme must be exactly `Bearer` (case-sensitive). Anything else,
/// including a blank remainder, yields `None`.
pub fn from_header_value(header: &str) -> Option<String> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
}

/// Extracts the bearer token carried by a request.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
pub fn extract(request: &dyn HttpRequest) -> Option<String> {
    request.header(AUTHORIZATION).and_then(from_header_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn test_bearer_token_is_remainder() {
        assert_eq!(from_header_value("Bearer abc.def"), Some("abc.def".to_string()));
        assert_eq!(from_header_value("Bearer  padded  "), Some("padded".to_string()));
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        assert!(from_header_value("bearer abc").is_none());
        assert!(from_header_value("BEARER abc").is_none());
    }

    #[test]
    fn test_other_schemes_are_ignored() {
        assert!(from_header_value("Basic dXNlcjpwYXNz").is_none());
        assert!(from_header_value("Bearer").is_none());
        assert!(from_header_value("Bearer    ").is_none());
        assert!(from_header_value("").is_none());
    }

    #[test]
    fn test_extract_from_request() {
        let (parts, _) = Request::builder()
            .header("Authorization", "Bearer valid-token")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(extract(&parts), Some("valid-token".to_string()));

        let (parts, _) = Request::builder().body(()).unwrap().into_parts();
        assert!(extract(&parts).is_none());
    }
}
