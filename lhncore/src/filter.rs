//! Decides which conversations appear in the sidebar and in what order.
//!
//! [`select_visible`] is a pure function over an input snapshot. It keeps no
//! state between calls, so changing the focused conversation simply means
//! calling it again with the new [`ViewerContext`].
//!
//! Rules are evaluated in order and the first decisive one wins:
//!
//! 1. No participants and no special chat type: excluded.
//! 2. The focused conversation: included.
//! 3. Missing the beta for a gated chat type: excluded. Default rooms of a
//!    free workspace are exempt.
//! 4. Pinned, drafted or with an outstanding request: included.
//! 5. Archived, or a user created room, with no comments: excluded.
//! 6. Focus mode: included only when unread.
//! 7. Everything else: included.

use crate::permissions;
use crate::types::{ChatType, Conversation, ViewerContext, Workspace, WorkspaceId};
use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Which rule settled a [`Decision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NoParticipants,
    Focused,
    MissingFeatureFlag,
    AlwaysRelevant,
    Unread,
    ReadInFocusMode,
    ArchivedWithoutComments,
    EmptyPolicyRoom,
    Listed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Include(Reason),
    Exclude(Reason),
}

impl Decision {
    pub fn is_included(&self) -> bool {
        matches!(self, Self::Include(_))
    }

    pub fn reason(&self) -> Reason {
        match self {
            Self::Include(reason) | Self::Exclude(reason) => *reason,
        }
    }
}

/// Apply the visibility rules to a single conversation.
pub fn decide(
    conversation: &Conversation,
    viewer: &ViewerContext,
    workspaces: &HashMap<WorkspaceId, Workspace>,
) -> Decision {
    if !conversation.has_participants() && !conversation.chat_type.is_special() {
        return Decision::Exclude(Reason::NoParticipants);
    }

    if viewer.is_focused(&conversation.id) {
        return Decision::Include(Reason::Focused);
    }

    let workspace = conversation
        .workspace_id
        .as_ref()
        .and_then(|id| workspaces.get(id));
    if !permissions::can_see_chat_type(viewer, conversation.chat_type, workspace) {
        return Decision::Exclude(Reason::MissingFeatureFlag);
    }

    if conversation.is_always_relevant() {
        return Decision::Include(Reason::AlwaysRelevant);
    }

    // Applies in both display modes, so focus mode never lists more.
    if !conversation.has_comments() {
        if conversation.is_archived {
            return Decision::Exclude(Reason::ArchivedWithoutComments);
        }
        if conversation.chat_type == ChatType::UserCreatedPolicyRoom {
            return Decision::Exclude(Reason::EmptyPolicyRoom);
        }
    }

    if viewer.display_mode.is_focus() {
        return if conversation.is_unread() {
            Decision::Include(Reason::Unread)
        } else {
            Decision::Exclude(Reason::ReadInFocusMode)
        };
    }

    Decision::Include(Reason::Listed)
}

/// Sidebar order: pinned first, then most recent comment first. Conversations
/// without comments sort after those with comments.
pub fn compare_for_display(a: &Conversation, b: &Conversation) -> Ordering {
    b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.last_message_timestamp.cmp(&a.last_message_timestamp))
}

/// The ordered subset of `conversations` the sidebar should list.
///
/// Ties in [`compare_for_display`] keep the order of the input slice.
pub fn select_visible<'a>(
    conversations: &'a [Conversation],
    viewer: &ViewerContext,
    workspaces: &HashMap<WorkspaceId, Workspace>,
) -> Vec<&'a Conversation> {
    let mut visible: Vec<&Conversation> = conversations
        .iter()
        .filter(|conversation| {
            let decision = decide(conversation, viewer, workspaces);
            if !decision.is_included() {
                trace!(
                    "Hiding conversation {} ({}): {:?}",
                    conversation.id,
                    conversation.chat_type,
                    decision.reason()
                );
            }
            decision.is_included()
        })
        .collect();

    // `sort_by` is stable, which keeps insertion order for ties.
    visible.sort_by(|a, b| compare_for_display(a, b));

    debug!(
        "Selected {} of {} conversations (mode: {:?}, focused: {:?})",
        visible.len(),
        conversations.len(),
        viewer.display_mode,
        viewer.focused_conversation_id
    );
    visible
}
