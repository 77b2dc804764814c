use crate::types::conversation::ConversationId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A beta the viewer has been enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureFlag {
    /// Grants every beta.
    All,
    PolicyExpenseChat,
    PolicyRooms,
    DefaultRooms,
    /// A beta this crate does not know about. Kept so that round trips are lossless.
    Other(String),
}

impl FeatureFlag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::PolicyExpenseChat => "policyExpenseChat",
            Self::PolicyRooms => "policyRooms",
            Self::DefaultRooms => "defaultRooms",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FeatureFlag {
    fn from(value: String) -> Self {
        match value.as_str() {
            "all" => Self::All,
            "policyExpenseChat" => Self::PolicyExpenseChat,
            "policyRooms" => Self::PolicyRooms,
            "defaultRooms" => Self::DefaultRooms,
            _ => Self::Other(value),
        }
    }
}

impl From<FeatureFlag> for String {
    fn from(value: FeatureFlag) -> Self {
        match value {
            FeatureFlag::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the viewer prefers the list to be filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum DisplayMode {
    /// Most recent first, read conversations included.
    #[default]
    Default,
    /// "#focus" mode: read conversations are hidden unless they matter.
    Focus,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Focus => "gsd",
        }
    }

    pub fn is_focus(&self) -> bool {
        *self == Self::Focus
    }
}

impl From<String> for DisplayMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "gsd" | "focus" => Self::Focus,
            _ => Self::Default,
        }
    }
}

impl From<DisplayMode> for &'static str {
    fn from(value: DisplayMode) -> Self {
        value.as_str()
    }
}

/// Everything about the viewer that influences which conversations are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerContext {
    pub feature_flags: HashSet<FeatureFlag>,
    pub display_mode: DisplayMode,
    /// The conversation currently open, if any.
    pub focused_conversation_id: Option<ConversationId>,
}

impl ViewerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flags(mut self, flags: impl IntoIterator<Item = FeatureFlag>) -> Self {
        self.feature_flags = flags.into_iter().collect();
        self
    }

    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = mode;
        self
    }

    pub fn with_focused(mut self, id: impl Into<ConversationId>) -> Self {
        self.focused_conversation_id = Some(id.into());
        self
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_conversation_id.as_deref() == Some(id)
    }

    pub fn has_flag(&self, flag: &FeatureFlag) -> bool {
        self.feature_flags.contains(flag)
    }
}
