pub mod conversation;
pub mod personal_details;
pub mod viewer;
pub mod workspace;

pub use conversation::{ChatType, Conversation, ConversationId};
pub use personal_details::{PersonalDetail, PersonalDetailsMap};
pub use viewer::{DisplayMode, FeatureFlag, ViewerContext};
pub use workspace::{PlanTier, Workspace, WorkspaceId};

use crate::error::{RecordError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode a stored JSON record into one of the typed entities.
///
/// `key` is only used to make the error point at the offending record.
pub fn decode_record<T: DeserializeOwned>(key: &str, value: &serde_json::Value) -> Result<T> {
    T::deserialize(value).map_err(|source| RecordError::Decode {
        key: key.to_string(),
        source,
    })
}

/// Identifiers arrive either as JSON strings or as plain numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn optional_string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?
        .map(String::from)
        .filter(|id| !id.is_empty()))
}

/// Read an identifier value (string or number) outside of a record, e.g. the
/// currently-viewed conversation pointer.
pub fn id_from_value(key: &str, value: &serde_json::Value) -> Result<Option<String>> {
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s.clone())),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(RecordError::UnexpectedShape {
            key: key.to_string(),
            expected: "string or number",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_value_accepts_strings_and_numbers() {
        assert_eq!(id_from_value("k", &json!("12")).unwrap(), Some("12".to_string()));
        assert_eq!(id_from_value("k", &json!(12)).unwrap(), Some("12".to_string()));
        assert_eq!(id_from_value("k", &json!("")).unwrap(), None);
        assert_eq!(id_from_value("k", &json!(null)).unwrap(), None);
    }

    #[test]
    fn test_id_from_value_rejects_objects() {
        let err = id_from_value("currentlyViewedReportID", &json!({"id": 1})).unwrap_err();
        assert!(err.to_string().contains("currentlyViewedReportID"));
    }

    #[test]
    fn test_decode_record_reports_key_on_failure() {
        let err = decode_record::<Conversation>("report_7", &json!(["not", "a", "report"]))
            .unwrap_err();
        assert!(matches!(err, RecordError::Decode { ref key, .. } if key == "report_7"));
    }
}
