//! Static clarifying questions per category.
//!
//! Every category has an ordered list of three questions; `Unclassified`
//! uses the fallback list. Questions are addressed by a stable
//! [`QuestionId`] so the engine can remember what it already asked.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::IssueCategory;

/// Stable identity of a bank question: category slug plus position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId {
    pub category: IssueCategory,
    pub index: u8,
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category.slug(), self.index)
    }
}

/// A question together with its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClarifyingQuestion {
    pub id: QuestionId,
    pub text: &'static str,
}

const PERFORMANCE: [&str; 3] = [
    "Is your site slow to load on all devices and browsers, or only some?",
    "Does it load slowly on both Wi-Fi and mobile data?",
    "Has anything recently changed on your site before it got slow?",
];

const DESIGN_LAYOUT: [&str; 3] = [
    "What part of the design looks broken or off?",
    "Is the issue happening on mobile, desktop, or both?",
    "Has the layout issue always been there or did it just start recently?",
];

const FUNCTIONALITY: [&str; 3] = [
    "Which feature or page isn't working as expected?",
    "What do you expect to happen vs what actually happens?",
    "Have you tested this in multiple browsers?",
];

const ACCESS_ERRORS: [&str; 3] = [
    "What error are you seeing (e.g. 403, 404, white screen)?",
    "When does the error appear — right when loading the site or after clicking something?",
    "Are others also seeing this error, or just you?",
];

const UPDATE_PLUGIN: [&str; 3] = [
    "Did the problem start after installing or updating a plugin or theme?",
    "Which plugins/themes have you recently changed?",
    "Have you tried deactivating plugins to see if one causes it?",
];

const SECURITY_HACK: [&str; 3] = [
    "What makes you think the site was hacked?",
    "Are you seeing popups, redirects, or strange content?",
    "Have you recently changed passwords or installed security tools?",
];

const HOSTING_DNS: [&str; 3] = [
    "Have you recently switched hosting providers or made DNS changes?",
    "Is your domain showing any errors in DNS tools?",
    "Have you contacted your hosting provider about this?",
];

const FALLBACK: [&str; 3] = [
    "Can you clarify the problem a bit more?",
    "What exactly happens when the issue occurs?",
    "When did the issue start and how often does it happen?",
];

fn texts_for(category: IssueCategory) -> &'static [&'static str] {
    match category {
        IssueCategory::Performance => &PERFORMANCE,
        IssueCategory::DesignLayout => &DESIGN_LAYOUT,
        IssueCategory::Functionality => &FUNCTIONALITY,
        IssueCategory::AccessErrors => &ACCESS_ERRORS,
        IssueCategory::UpdatePlugin => &UPDATE_PLUGIN,
        IssueCategory::SecurityHack => &SECURITY_HACK,
        IssueCategory::HostingDns => &HOSTING_DNS,
        IssueCategory::Unclassified => &FALLBACK,
    }
}

/// All questions for a category, in order.
pub fn questions_for(category: IssueCategory) -> Vec<ClarifyingQuestion> {
    texts_for(category)
        .iter()
        .enumerate()
        .map(|(index, text)| ClarifyingQuestion {
            id: QuestionId {
                category,
                index: index as u8,
            },
            text,
        })
        .collect()
}

/// Questions for a category that have not been asked yet, in order.
pub fn remaining_questions(
    category: IssueCategory,
    asked: &BTreeSet<QuestionId>,
) -> Vec<ClarifyingQuestion> {
    questions_for(category)
        .into_iter()
        .filter(|q| !asked.contains(&q.id))
        .collect()
}
