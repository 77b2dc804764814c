//! Builds a [`SidebarSnapshot`] out of whatever the store currently holds.
//!
//! The store may be partially hydrated: records can be missing or malformed,
//! and a conversation may point at a workspace that has not arrived yet.
//! Nothing here fails. Undecodable records are skipped and reported back in
//! [`Hydration::errors`].

use crate::config::SidebarConfig;
use crate::error::{RecordError, Result, SidebarError};
use crate::keys;
use crate::store::KeyValueStore;
use lhncore::SidebarSnapshot;
use lhncore::types::{
    Conversation, DisplayMode, FeatureFlag, PersonalDetailsMap, ViewerContext, Workspace,
    decode_record, id_from_value,
};
use log::warn;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Hydration {
    pub snapshot: SidebarSnapshot,
    pub errors: Vec<RecordError>,
}

impl Hydration {
    /// The snapshot, or the first record that could not be decoded.
    pub fn into_strict(self) -> Result<SidebarSnapshot> {
        match self.errors.into_iter().next() {
            Some(err) => Err(SidebarError::Record(err)),
            None => Ok(self.snapshot),
        }
    }
}

pub fn hydrate(store: &KeyValueStore, config: &SidebarConfig) -> Hydration {
    let mut errors = Vec::new();

    let conversations: Vec<Conversation> = store
        .collection(keys::collection::REPORT)
        .into_iter()
        .filter_map(|(key, value)| keep(Conversation::from_record(&key, &value), &mut errors))
        .collect();

    let workspaces: HashMap<_, _> = store
        .collection(keys::collection::POLICY)
        .into_iter()
        .filter_map(|(key, value)| keep(Workspace::from_record(&key, &value), &mut errors))
        .map(|workspace| (workspace.id.clone(), workspace))
        .collect();

    let feature_flags: Vec<FeatureFlag> =
        read_key(store, keys::BETAS, &mut errors).unwrap_or_default();

    let display_mode = store
        .get(keys::NVP_PRIORITY_MODE)
        .and_then(|value| value.as_str().map(|mode| DisplayMode::from(mode.to_string())))
        .unwrap_or(config.default_display_mode);

    let focused_conversation_id = store
        .get(keys::CURRENTLY_VIEWED_REPORTID)
        .and_then(|value| keep(id_from_value(keys::CURRENTLY_VIEWED_REPORTID, &value), &mut errors))
        .flatten();

    let personal_details: PersonalDetailsMap =
        read_key(store, keys::PERSONAL_DETAILS, &mut errors).unwrap_or_default();

    Hydration {
        snapshot: SidebarSnapshot {
            conversations,
            viewer: ViewerContext {
                feature_flags: feature_flags.into_iter().collect(),
                display_mode,
                focused_conversation_id,
            },
            workspaces,
            personal_details,
        },
        errors,
    }
}

fn keep<T>(result: std::result::Result<T, RecordError>, errors: &mut Vec<RecordError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("Skipping record: {err}");
            errors.push(err);
            None
        }
    }
}

fn read_key<T: serde::de::DeserializeOwned>(
    store: &KeyValueStore,
    key: &str,
    errors: &mut Vec<RecordError>,
) -> Option<T> {
    store
        .get(key)
        .and_then(|value| keep(decode_record(key, &value), errors))
}

/// Read a store dump: a JSON object mapping keys to values.
///
/// Keys come back in file order, which becomes the store's insertion order.
pub fn read_state_file(path: impl AsRef<Path>) -> Result<Map<String, Value>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| SidebarError::StateRead {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(entries)) => Ok(entries),
        Ok(_) => Err(SidebarError::StateInvalid {
            path: path.to_path_buf(),
            reason: "top level must be an object of key/value pairs".to_string(),
        }),
        Err(err) => Err(SidebarError::StateInvalid {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lhncore::types::PlanTier;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_empty_store_hydrates_to_defaults() {
        let store = KeyValueStore::new();
        let config = SidebarConfig {
            default_display_mode: DisplayMode::Focus,
            ..Default::default()
        };

        let hydration = hydrate(&store, &config);
        assert!(hydration.errors.is_empty());
        assert!(hydration.snapshot.conversations.is_empty());
        assert_eq!(hydration.snapshot.viewer.display_mode, DisplayMode::Focus);
        assert!(hydration.snapshot.viewer.focused_conversation_id.is_none());
    }

    #[test]
    fn test_reads_every_sidebar_key() {
        let store = KeyValueStore::new();
        store.multi_set([
            (keys::BETAS, json!(["policyRooms"])),
            (keys::NVP_PRIORITY_MODE, json!("gsd")),
            (keys::CURRENTLY_VIEWED_REPORTID, json!(2)),
            (
                keys::PERSONAL_DETAILS,
                json!({"email1@test.com": {"login": "email1@test.com", "firstName": "One"}}),
            ),
            ("report_2", json!({"reportID": 2, "participants": ["email1@test.com"]})),
            ("report_1", json!({"reportID": "1", "participants": ["email1@test.com"]})),
            ("policy_1", json!({"policyID": "1", "type": "free"})),
        ]);

        let snapshot = hydrate(&store, &SidebarConfig::default()).into_strict().unwrap();
        let ids: Vec<&str> = snapshot.conversations.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(snapshot.viewer.has_flag(&FeatureFlag::PolicyRooms));
        assert_eq!(snapshot.viewer.display_mode, DisplayMode::Focus);
        assert!(snapshot.viewer.is_focused("2"));
        assert_eq!(snapshot.workspaces["1"].plan_tier, PlanTier::Free);
        assert_eq!(snapshot.personal_details["email1@test.com"].first_name, "One");
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let store = KeyValueStore::new();
        store.multi_set([
            ("report_1", json!({"reportID": "1", "participants": ["a"]})),
            ("report_2", json!("garbage")),
            ("policy_1", json!({"type": "free"})),
            (keys::BETAS, json!({"not": "a list"})),
        ]);

        let hydration = hydrate(&store, &SidebarConfig::default());
        assert_eq!(hydration.snapshot.conversations.len(), 1);
        assert!(hydration.snapshot.workspaces.is_empty());
        assert!(hydration.snapshot.viewer.feature_flags.is_empty());
        assert_eq!(hydration.errors.len(), 3);
        assert!(matches!(
            hydration.into_strict(),
            Err(SidebarError::Record(RecordError::Decode { .. }))
        ));
    }

    #[test]
    fn test_read_state_file_requires_an_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        assert!(matches!(
            read_state_file(file.path()),
            Err(SidebarError::StateInvalid { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"betas": ["all"]}}"#).unwrap();
        let entries = read_state_file(file.path()).unwrap();
        assert_eq!(entries["betas"], json!(["all"]));
    }

    #[test]
    fn test_state_file_order_is_insertion_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "report_2": {{"reportID": "2", "participants": ["a"]}},
                "report_10": {{"reportID": "10", "participants": ["b"]}},
                "report_1": {{"reportID": "1", "participants": ["c"]}}
            }}"#
        )
        .unwrap();

        let store = KeyValueStore::new();
        store.multi_set(read_state_file(file.path()).unwrap());

        let snapshot = hydrate(&store, &SidebarConfig::default()).into_strict().unwrap();
        let ids: Vec<&str> = snapshot.visible().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "10", "1"]);
    }
}
