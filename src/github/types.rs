use serde::Deserialize;

/// Branch metadata of a pull request's head
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Head {
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// One row of search results, reduced to what the picker needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    pub title: String,
    pub number: u64,
    /// Search results usually omit this; the head is re-fetched on checkout
    pub head: Option<Head>,
    pub author: String,
    pub url: String, // HTML URL for browser
}
