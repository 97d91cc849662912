//! Remote directory retrieval.
//!
//! All failure modes collapse into [`FetchError`]; the UI layer renders
//! them as status messages with a retry affordance, never as a crash.

use serde_json::Value;
use thiserror::Error;

use crate::member::{self, Member};
use crate::query;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure or undecodable body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    /// The body decoded, but is not a JSON array of records.
    #[error("unexpected payload shape: expected a JSON array")]
    Shape,
}

/// Validate the payload shape and normalize every entry.
///
/// Individual records cannot fail — normalization is total — so the only
/// rejection here is a non-array payload.
pub fn members_from_value(payload: &Value) -> Result<Vec<Member>, FetchError> {
    match payload {
        Value::Array(entries) => Ok(entries.iter().map(member::normalize).collect()),
        _ => Err(FetchError::Shape),
    }
}

/// Fetch, validate, normalize and name-sort the member directory.
pub async fn fetch_members(url: &str) -> Result<Vec<Member>, FetchError> {
    tracing::debug!("fetching member directory from {url}");

    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let payload: Value = response.json().await?;
    let mut members = members_from_value(&payload)?;

    members.sort_by(|a, b| query::natural_cmp(a.name.trim(), b.name.trim()));

    tracing::info!("fetched {} member records", members.len());
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_array_payload_is_a_shape_error() {
        for payload in [json!({}), json!("nope"), json!(3), json!(null)] {
            assert!(matches!(
                members_from_value(&payload),
                Err(FetchError::Shape)
            ));
        }
    }

    #[test]
    fn array_payload_normalizes_every_entry() {
        let payload = json!([
            { "name": "Zoe", "Region": "West Africa" },
            { },
            "not even an object",
        ]);
        let members = members_from_value(&payload).unwrap();
        assert_eq!(members.len(), 3);
        assert_eq!(members[0].name, "Zoe");
        assert_eq!(members[0].region, "West Africa");
        // Malformed entries still come out fully populated.
        assert_eq!(members[1].photo, crate::member::DEFAULT_PHOTO);
        assert_eq!(members[2].name, "");
    }

    #[test]
    fn empty_array_is_not_an_error() {
        let members = members_from_value(&json!([])).unwrap();
        assert!(members.is_empty());
    }
}
