//! Conversation records as they are listed in the sidebar.

use crate::error::{RecordError, Result};
use crate::types::viewer::FeatureFlag;
use crate::types::workspace::WorkspaceId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ConversationId = String;

/// Category of a conversation.
///
/// Everything other than [`ChatType::None`] is a "special" conversation that
/// may be shown without participants, and most special types are gated
/// behind a feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ChatType {
    /// Regular direct or group chat.
    #[default]
    None,
    /// Expense chat between a workspace member and the workspace.
    PolicyExpenseChat,
    /// Room created by a user inside a workspace.
    UserCreatedPolicyRoom,
    /// Default room for workspace admins.
    PolicyAdmins,
    /// Default announcement room of a workspace.
    PolicyAnnounce,
    /// Default room for everyone on a domain.
    DomainAll,
}

impl ChatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::PolicyExpenseChat => "policyExpenseChat",
            Self::UserCreatedPolicyRoom => "policyRoom",
            Self::PolicyAdmins => "policyAdmins",
            Self::PolicyAnnounce => "policyAnnounce",
            Self::DomainAll => "domainAll",
        }
    }

    /// The administrative rooms every workspace or domain gets automatically.
    pub fn is_default_room(&self) -> bool {
        matches!(
            self,
            Self::PolicyAdmins | Self::PolicyAnnounce | Self::DomainAll
        )
    }

    pub fn is_special(&self) -> bool {
        *self != Self::None
    }

    /// The flag a viewer must hold to see this category, if any.
    pub fn required_flag(&self) -> Option<FeatureFlag> {
        match self {
            Self::None => None,
            Self::PolicyExpenseChat => Some(FeatureFlag::PolicyExpenseChat),
            Self::UserCreatedPolicyRoom => Some(FeatureFlag::PolicyRooms),
            Self::PolicyAdmins | Self::PolicyAnnounce | Self::DomainAll => {
                Some(FeatureFlag::DefaultRooms)
            }
        }
    }
}

impl From<String> for ChatType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "policyExpenseChat" => Self::PolicyExpenseChat,
            "policyRoom" => Self::UserCreatedPolicyRoom,
            "policyAdmins" => Self::PolicyAdmins,
            "policyAnnounce" => Self::PolicyAnnounce,
            "domainAll" => Self::DomainAll,
            // Unknown categories are treated like a regular chat.
            _ => Self::None,
        }
    }
}

impl From<ChatType> for &'static str {
    fn from(value: ChatType) -> Self {
        value.as_str()
    }
}

impl std::fmt::Display for ChatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("chat"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// A single conversation as supplied by the store.
///
/// The field names on the wire follow the report records of the chat
/// backend (`reportID`, `maxSequenceNumber`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(rename = "reportID", deserialize_with = "super::string_or_number")]
    pub id: ConversationId,
    /// Participant logins, excluding the viewer. Order is display order.
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub chat_type: ChatType,
    #[serde(
        rename = "policyID",
        default,
        deserialize_with = "super::optional_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub has_add_workspace_error: bool,
    #[serde(rename = "lastReadSequenceNumber", default)]
    pub last_read_marker: u64,
    #[serde(rename = "maxSequenceNumber", default)]
    pub last_activity_marker: u64,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(rename = "hasDraft", default)]
    pub has_unsaved_draft: bool,
    #[serde(rename = "hasOutstandingIOU", default)]
    pub has_outstanding_request: bool,
    /// Time of the last comment; `None` when nobody has commented yet.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_message_timestamp: Option<DateTime<Utc>>,
}

impl Conversation {
    pub fn new(id: impl Into<ConversationId>) -> Self {
        Self {
            id: id.into(),
            participants: Vec::new(),
            chat_type: ChatType::None,
            workspace_id: None,
            is_archived: false,
            has_add_workspace_error: false,
            last_read_marker: 0,
            last_activity_marker: 0,
            is_pinned: false,
            has_unsaved_draft: false,
            has_outstanding_request: false,
            last_message_timestamp: None,
        }
    }

    /// Decode and validate a stored record.
    pub fn from_record(key: &str, value: &serde_json::Value) -> Result<Self> {
        let conversation: Self = super::decode_record(key, value)?;
        if conversation.id.is_empty() {
            return Err(RecordError::MissingId(key.to_string()));
        }
        Ok(conversation)
    }

    pub fn is_unread(&self) -> bool {
        self.last_read_marker < self.last_activity_marker
    }

    pub fn has_comments(&self) -> bool {
        self.last_message_timestamp.is_some()
    }

    pub fn has_participants(&self) -> bool {
        !self.participants.is_empty()
    }

    /// Pinned, drafted and outstanding conversations stay relevant no matter
    /// how the viewer filters the list.
    pub fn is_always_relevant(&self) -> bool {
        self.is_pinned || self.has_unsaved_draft || self.has_outstanding_request
    }
}
