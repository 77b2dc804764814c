use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public profile of another user, keyed by login in [`PersonalDetailsMap`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDetail {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub first_name: String,
}

impl PersonalDetail {
    /// Name used when the user is listed alongside other participants.
    pub fn short_name(&self) -> &str {
        [&self.first_name, &self.display_name, &self.login]
            .into_iter()
            .find(|name| !name.is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Name used when the user is the only participant.
    pub fn full_name(&self) -> &str {
        [&self.display_name, &self.first_name, &self.login]
            .into_iter()
            .find(|name| !name.is_empty())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

pub type PersonalDetailsMap = HashMap<String, PersonalDetail>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_fallbacks() {
        let detail = PersonalDetail {
            login: "email1@test.com".to_string(),
            display_name: "Email One".to_string(),
            first_name: "One".to_string(),
        };
        assert_eq!(detail.short_name(), "One");
        assert_eq!(detail.full_name(), "Email One");

        let login_only = PersonalDetail {
            login: "email9@test.com".to_string(),
            ..Default::default()
        };
        assert_eq!(login_only.short_name(), "email9@test.com");
        assert_eq!(login_only.full_name(), "email9@test.com");
    }
}
