use serde::{Deserialize, Serialize};

/// Structured extraction of one page's links, text excerpt, author and
/// heuristic bias score.
///
/// Produced fresh for every analysis request and discarded after being
/// forwarded to the report requester; never cached or persisted. Field names
/// serialize in camelCase to match the analyze-message wire contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// URL the page was loaded from
    pub url: String,

    /// Document title (may be empty)
    pub title: String,

    /// Resolved outbound links: deduplicated, fragment-bearing URLs
    /// excluded, capped at 500 entries
    pub links: Vec<String>,

    /// Labels from the fixed motive-indicator vocabulary, deduplicated
    pub motive_indicators: Vec<String>,

    /// First author match across metadata, JSON-LD and byline heuristics
    pub author: Option<String>,

    /// First 3000 characters of the page's rendered text content
    pub excerpt: String,

    /// Additive keyword heuristic, clamped to 0-100
    pub bias_score: u8,
}
