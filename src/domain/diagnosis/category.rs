//! Issue categories the classifier can assign.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic category of a website problem.
///
/// Seven fixed categories plus `Unclassified` for replies the model
/// labels with anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueCategory {
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Design/Layout")]
    DesignLayout,
    #[serde(rename = "Functionality")]
    Functionality,
    #[serde(rename = "Access/Errors")]
    AccessErrors,
    #[serde(rename = "Update/Plugin")]
    UpdatePlugin,
    #[serde(rename = "Security/Hack")]
    SecurityHack,
    #[serde(rename = "Hosting/DNS")]
    HostingDns,
    #[serde(rename = "Unclassified")]
    Unclassified,
}

impl IssueCategory {
    /// The seven categories offered to the classifier, in prompt order.
    pub const DIAGNOSTIC: [IssueCategory; 7] = [
        IssueCategory::Performance,
        IssueCategory::DesignLayout,
        IssueCategory::Functionality,
        IssueCategory::AccessErrors,
        IssueCategory::UpdatePlugin,
        IssueCategory::SecurityHack,
        IssueCategory::HostingDns,
    ];

    /// Human-readable label, as used in prompts and API payloads.
    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Performance => "Performance",
            IssueCategory::DesignLayout => "Design/Layout",
            IssueCategory::Functionality => "Functionality",
            IssueCategory::AccessErrors => "Access/Errors",
            IssueCategory::UpdatePlugin => "Update/Plugin",
            IssueCategory::SecurityHack => "Security/Hack",
            IssueCategory::HostingDns => "Hosting/DNS",
            IssueCategory::Unclassified => "Unclassified",
        }
    }

    /// Short identifier used to build question ids.
    pub fn slug(&self) -> &'static str {
        match self {
            IssueCategory::Performance => "performance",
            IssueCategory::DesignLayout => "design",
            IssueCategory::Functionality => "functionality",
            IssueCategory::AccessErrors => "access",
            IssueCategory::UpdatePlugin => "plugin",
            IssueCategory::SecurityHack => "security",
            IssueCategory::HostingDns => "hosting",
            IssueCategory::Unclassified => "fallback",
        }
    }

    /// Matches a label case-insensitively. Unknown labels are `Unclassified`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::DIAGNOSTIC
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or(IssueCategory::Unclassified)
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
