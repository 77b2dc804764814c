use crate::error::Result;
use serde::{Deserialize, Serialize};

pub type WorkspaceId = String;

/// Billing tier of a workspace.
///
/// The backend reports a policy type (`free`, `team`, `corporate`, ...); every
/// type except `free` is a paid plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PlanTier {
    Free,
    #[default]
    Paid,
}

impl PlanTier {
    pub fn is_free(&self) -> bool {
        *self == Self::Free
    }
}

impl From<String> for PlanTier {
    fn from(value: String) -> Self {
        if value == "free" { Self::Free } else { Self::Paid }
    }
}

impl From<PlanTier> for &'static str {
    fn from(value: PlanTier) -> Self {
        match value {
            PlanTier::Free => "free",
            PlanTier::Paid => "corporate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(rename = "policyID", deserialize_with = "super::string_or_number")]
    pub id: WorkspaceId,
    /// A missing type is treated as paid so default rooms stay behind their flag.
    #[serde(rename = "type", default)]
    pub plan_tier: PlanTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Workspace {
    pub fn new(id: impl Into<WorkspaceId>, plan_tier: PlanTier) -> Self {
        Self {
            id: id.into(),
            plan_tier,
            name: None,
        }
    }

    pub fn from_record(key: &str, value: &serde_json::Value) -> Result<Self> {
        let workspace: Self = super::decode_record(key, value)?;
        if workspace.id.is_empty() {
            return Err(crate::error::RecordError::MissingId(key.to_string()));
        }
        Ok(workspace)
    }
}
