//! Beta gates for the conversation categories that are not generally available.

use crate::types::{ChatType, FeatureFlag, ViewerContext, Workspace};

/// Whether the viewer holds `flag`. The `All` flag grants every beta.
pub fn can_use(viewer: &ViewerContext, flag: &FeatureFlag) -> bool {
    viewer.has_flag(&FeatureFlag::All) || viewer.has_flag(flag)
}

/// Whether the viewer may see a conversation of `chat_type` owned by `workspace`.
///
/// Default rooms of a free workspace are always allowed. An unknown workspace
/// (`None`) is never exempt.
pub fn can_see_chat_type(
    viewer: &ViewerContext,
    chat_type: ChatType,
    workspace: Option<&Workspace>,
) -> bool {
    if chat_type.is_default_room() && workspace.is_some_and(|w| w.plan_tier.is_free()) {
        return true;
    }
    chat_type
        .required_flag()
        .is_none_or(|flag| can_use(viewer, &flag))
}
