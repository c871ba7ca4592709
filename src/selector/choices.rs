use std::fmt;

use crate::github::{Mode, PullRequestSummary};

/// What picking a row does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceValue {
    Checkout(PullRequestSummary),
    View(String),
}

/// One selectable row of the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    /// Rendered after the label in italics
    pub note: Option<String>,
    pub value: ChoiceValue,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.note {
            Some(note) => write!(f, "{} {}", self.label, note),
            None => f.write_str(&self.label),
        }
    }
}

/// Two rows per pull request: checkout, then "view" with its URL.
/// Positions are 1-based and follow the input order.
pub fn build_choices(prs: &[PullRequestSummary], mode: Mode) -> Vec<Choice> {
    prs.iter()
        .enumerate()
        .flat_map(|(idx, pr)| {
            let note = match mode {
                Mode::Review => Some(format!("[from {}]", pr.author)),
                Mode::Authored => None,
            };
            [
                Choice {
                    label: format!("[{}] {}", idx + 1, pr.title),
                    note,
                    value: ChoiceValue::Checkout(pr.clone()),
                },
                Choice {
                    label: format!("  -> view {}", pr.url),
                    note: None,
                    value: ChoiceValue::View(pr.url.clone()),
                },
            ]
        })
        .collect()
}
