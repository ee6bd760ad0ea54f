//! Posting data structures.

use serde::{Deserialize, Serialize};

/// A raw `(identifier, title)` pair as extracted from a rendered page,
/// before URL resolution and relevance filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Href or full address of the posting; may be relative
    pub href: String,

    /// Visible text or nearby heading, untrimmed
    pub title: String,
}

impl RawCandidate {
    pub fn new(href: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            title: title.into(),
        }
    }
}

/// A canonical job posting.
///
/// `url` is absolute and doubles as the identity key; `title` is display
/// text only and never participates in deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Posting {
    /// Id of the configured site this posting came from
    pub source: String,

    /// Absolute, scheme-qualified posting URL
    pub url: String,

    /// Posting title
    pub title: String,
}
