//! Well-known store keys read by the sidebar.

pub const PERSONAL_DETAILS: &str = "personalDetails";
pub const CURRENTLY_VIEWED_REPORTID: &str = "currentlyViewedReportID";
pub const NVP_PRIORITY_MODE: &str = "nvp_priorityMode";
pub const BETAS: &str = "betas";

/// Prefixes of keyed collections. A record lives at `<prefix><id>`.
pub mod collection {
    pub const REPORT: &str = "report_";
    pub const POLICY: &str = "policy_";
}

pub fn report_key(id: &str) -> String {
    format!("{}{}", collection::REPORT, id)
}

pub fn policy_key(id: &str) -> String {
    format!("{}{}", collection::POLICY, id)
}

/// Whether a change to `key` can alter the sidebar contents.
pub fn affects_sidebar(key: &str) -> bool {
    matches!(
        key,
        PERSONAL_DETAILS | CURRENTLY_VIEWED_REPORTID | NVP_PRIORITY_MODE | BETAS
    ) || key.starts_with(collection::REPORT)
        || key.starts_with(collection::POLICY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affects_sidebar() {
        assert!(affects_sidebar(BETAS));
        assert!(affects_sidebar(&report_key("1")));
        assert!(affects_sidebar(&policy_key("1")));
        assert!(affects_sidebar(CURRENTLY_VIEWED_REPORTID));
        assert!(!affects_sidebar("session"));
        assert!(!affects_sidebar("reportActions_1"));
        assert!(!affects_sidebar("reportIOUs_1"));
    }
}
