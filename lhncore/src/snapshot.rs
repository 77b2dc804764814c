use crate::filter;
use crate::types::{Conversation, PersonalDetailsMap, ViewerContext, Workspace, WorkspaceId};
use std::collections::HashMap;

/// Immutable input for one recomputation of the sidebar.
///
/// `conversations` is in store insertion order, which is the tie breaker of
/// the display order.
#[derive(Debug, Clone, Default)]
pub struct SidebarSnapshot {
    pub conversations: Vec<Conversation>,
    pub viewer: ViewerContext,
    pub workspaces: HashMap<WorkspaceId, Workspace>,
    pub personal_details: PersonalDetailsMap,
}

impl SidebarSnapshot {
    pub fn visible(&self) -> Vec<&Conversation> {
        filter::select_visible(&self.conversations, &self.viewer, &self.workspaces)
    }

    pub fn workspace_of(&self, conversation: &Conversation) -> Option<&Workspace> {
        conversation
            .workspace_id
            .as_ref()
            .and_then(|id| self.workspaces.get(id))
    }

    /// Names shown for a conversation row.
    ///
    /// Several participants are listed by short name, a single participant by
    /// full name. Rooms without participants fall back to the workspace name,
    /// then to the conversation id.
    pub fn display_names(&self, conversation: &Conversation) -> String {
        let lookup = |login: &String, short: bool| {
            self.personal_details
                .get(login)
                .map(|detail| {
                    if short {
                        detail.short_name()
                    } else {
                        detail.full_name()
                    }
                })
                .filter(|name| !name.is_empty())
                .unwrap_or(login.as_str())
                .to_string()
        };

        match conversation.participants.as_slice() {
            [] => self
                .workspace_of(conversation)
                .and_then(|workspace| workspace.name.clone())
                .unwrap_or_else(|| conversation.id.clone()),
            [only] => lookup(only, false),
            many => many
                .iter()
                .map(|login| lookup(login, true))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatType, PersonalDetail, PlanTier};

    fn details() -> PersonalDetailsMap {
        [("One", 1), ("Two", 2)]
            .into_iter()
            .map(|(name, n)| {
                let login = format!("email{n}@test.com");
                (
                    login.clone(),
                    PersonalDetail {
                        login,
                        display_name: format!("Email {name}"),
                        first_name: name.to_string(),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_display_names_for_group_and_single_participants() {
        let snapshot = SidebarSnapshot {
            personal_details: details(),
            ..Default::default()
        };

        let mut group = Conversation::new("1");
        group.participants = vec!["email1@test.com".into(), "email2@test.com".into()];
        assert_eq!(snapshot.display_names(&group), "One, Two");

        let mut single = Conversation::new("2");
        single.participants = vec!["email2@test.com".into()];
        assert_eq!(snapshot.display_names(&single), "Email Two");

        let mut stranger = Conversation::new("3");
        stranger.participants = vec!["email1@test.com".into(), "nobody@test.com".into()];
        assert_eq!(snapshot.display_names(&stranger), "One, nobody@test.com");
    }

    #[test]
    fn test_display_names_for_rooms_without_participants() {
        let mut workspace = Workspace::new("1", PlanTier::Free);
        workspace.name = Some("Policy One".to_string());
        let snapshot = SidebarSnapshot {
            workspaces: HashMap::from([("1".to_string(), workspace)]),
            ..Default::default()
        };

        let mut room = Conversation::new("10");
        room.chat_type = ChatType::PolicyAdmins;
        room.workspace_id = Some("1".to_string());
        assert_eq!(snapshot.display_names(&room), "Policy One");

        room.workspace_id = None;
        assert_eq!(snapshot.display_names(&room), "10");
    }
}
