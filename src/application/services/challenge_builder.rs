//! Renders `WWW-Authenticate` challenge values.

use crate::domain::challenge::ChallengeFields;

/// Scheme name every challenge starts with.
pub const BEARER_SCHEME: &str = "Bearer";

/// Builds a `Bearer` challenge from the given fields.
///
/// Parameters are emitted in the fixed order `realm`, `error`,
/// `error_description`, `error_uri`, `scope`, skipping empty ones. `realm`
/// falls back to `default_realm` when the fields carry none. Values are
/// quoted as-is; they are expected to come from trusted configuration.
///
/// # Examples
///
/// ```
/// use bearer_gate::application::services::challenge_builder::build;
/// use bearer_gate::domain::challenge::ChallengeFields;
///
/// let fields = ChallengeFields {
///     realm: Some("custom_realm".to_string()),
///     scope: Some("custom_scope".to_string()),
///     ..Default::default()
/// };
///
/// assert_eq!(
///     build(&fields, None),
///     r#"Bearer realm="custom_realm", scope="custom_scope""#
/// );
/// ```
pub fn build(fields: &ChallengeFields, default_realm: Option<&str>) -> String {
    let realm = non_empty(fields.realm.as_deref()).or(non_empty(default_realm));

    let params: Vec<String> = [
        ("realm", realm),
        ("error", non_empty(fields.error.as_deref())),
        (
            "error_description",
            non_empty(fields.error_description.as_deref()),
        ),
        ("error_uri", non_empty(fields.error_uri.as_deref())),
        ("scope", non_empty(fields.scope.as_deref())),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| format!("{key}=\"{v}\"")))
    .collect();

    if params.is_empty() {
        BEARER_SCHEME.to_string()
    } else {
        format!("{BEARER_SCHEME} {}", params.join(", "))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
