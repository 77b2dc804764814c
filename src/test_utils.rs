//! Fake records for exercising the sidebar through a [`KeyValueStore`].
//!
//! [`KeyValueStore`]: crate::store::KeyValueStore

use crate::keys;
use chrono::{DateTime, TimeZone, Utc};
use lhncore::types::{ChatType, Conversation};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

pub const TEST_MAX_SEQUENCE_NUMBER: u64 = 10;

/// Every fake report shares this timestamp, so display order falls back to
/// insertion order unless a test says otherwise.
pub const TEST_LAST_MESSAGE_MILLIS: i64 = 1_650_000_000_000;

const NUMBER_NAMES: [&str; 8] = [
    "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight",
];

static NEXT_REPORT_ID: AtomicU64 = AtomicU64::new(1);

fn last_message_timestamp() -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(TEST_LAST_MESSAGE_MILLIS).single()
}

/// Personal details for `email1@test.com` ("One") through `email8@test.com`
/// ("Eight"), in the shape stored under [`keys::PERSONAL_DETAILS`].
pub fn fake_personal_details() -> Value {
    let details: serde_json::Map<String, Value> = NUMBER_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let login = format!("email{}@test.com", i + 1);
            let detail = json!({
                "login": login.clone(),
                "displayName": format!("Email {name}"),
                "firstName": name,
            });
            (login, detail)
        })
        .collect();
    Value::Object(details)
}

/// A read conversation with comments and a unique id.
pub fn fake_report(participants: &[&str]) -> Conversation {
    let id = NEXT_REPORT_ID.fetch_add(1, Ordering::SeqCst);
    let mut report = Conversation::new(id.to_string());
    report.participants = participants.iter().map(|p| p.to_string()).collect();
    report.last_read_marker = TEST_MAX_SEQUENCE_NUMBER;
    report.last_activity_marker = TEST_MAX_SEQUENCE_NUMBER;
    report.last_message_timestamp = last_message_timestamp();
    report
}

/// The seven conversation properties the filter combines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvancedReport {
    pub has_comments: bool,
    pub is_archived: bool,
    pub is_user_created_policy_room: bool,
    pub has_add_workspace_error: bool,
    pub is_unread: bool,
    pub is_pinned: bool,
    pub has_draft: bool,
}

impl AdvancedReport {
    pub const VARIABLES: u32 = 7;

    /// Read the booleans from the low seven bits of `bits`, most significant
    /// bit first, in field order.
    pub fn from_bits(bits: u8) -> Self {
        let flag = |position: u32| bits & (1 << (Self::VARIABLES - 1 - position)) != 0;
        Self {
            has_comments: flag(0),
            is_archived: flag(1),
            is_user_created_policy_room: flag(2),
            has_add_workspace_error: flag(3),
            is_unread: flag(4),
            is_pinned: flag(5),
            has_draft: flag(6),
        }
    }

    pub fn as_array(&self) -> [bool; 7] {
        [
            self.has_comments,
            self.is_archived,
            self.is_user_created_policy_room,
            self.has_add_workspace_error,
            self.is_unread,
            self.is_pinned,
            self.has_draft,
        ]
    }

    /// A conversation between `email1@test.com` and `email2@test.com` with
    /// these properties.
    pub fn build(&self) -> Conversation {
        let mut report = fake_report(&["email1@test.com", "email2@test.com"]);
        if !self.has_comments {
            report.last_message_timestamp = None;
        }
        report.is_archived = self.is_archived;
        if self.is_user_created_policy_room {
            report.chat_type = ChatType::UserCreatedPolicyRoom;
        }
        report.has_add_workspace_error = self.has_add_workspace_error;
        if self.is_unread {
            report.last_read_marker = TEST_MAX_SEQUENCE_NUMBER - 1;
        }
        report.is_pinned = self.is_pinned;
        report.has_unsaved_draft = self.has_draft;
        report
    }
}

/// `(key, value)` pair storing `report` in its collection.
pub fn store_entry(report: &Conversation) -> (String, Value) {
    (
        keys::report_key(&report.id),
        serde_json::to_value(report).expect("conversation should serialize"),
    )
}

pub fn policy_entry(id: &str, policy_type: &str, name: Option<&str>) -> (String, Value) {
    let mut policy = json!({"policyID": id, "type": policy_type});
    if let Some(name) = name {
        policy["name"] = json!(name);
    }
    (keys::policy_key(id), policy)
}
