//! Maps authentication failures to RFC 6750 error codes.

use crate::domain::challenge::ChallengeFields;
use crate::domain::outcome::FailureReason;

/// RFC 6750 `invalid_token` error code.
pub const INVALID_TOKEN: &str = "invalid_token";

const DESCRIPTION_INVALID: &str = "The access token is not valid.";
const DESCRIPTION_EXPIRED: &str = "The access token is expired.";

/// Returns the error code and description inferred from a failure.
///
/// `RejectedByExtension` infers nothing; the extension that rejected the
/// request owns the challenge fields.
pub fn classify(reason: FailureReason) -> Option<(&'static str, &'static str)> {
    match reason {
        FailureReason::Missing | FailureReason::Malformed | FailureReason::AudienceMismatch => {
            Some((INVALID_TOKEN, DESCRIPTION_INVALID))
        }
        FailureReason::Expired => Some((INVALID_TOKEN, DESCRIPTION_EXPIRED)),
        FailureReason::RejectedByExtension => None,
    }
}

/// Seeds challenge fields from a prior failure.
///
/// The description is dropped when `include_error_details` is false; the
/// error code never is.
pub fn seed_fields(reason: Option<FailureReason>, include_error_details: bool) -> ChallengeFields {
    let mut fields = ChallengeFields::new();

    if let Some((error, description)) = reason.and_then(classify) {
        fields.error = Some(error.to_string());
        if include_error_details {
            fields.error_description = Some(description.to_string());
        }
    }

    fields
}
