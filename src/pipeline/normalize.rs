//! Posting normalization.
//!
//! Turns an adapter's raw candidates into canonical [`Posting`]s:
//! blank or irrelevant candidates are skipped silently, relative hrefs
//! are resolved against the site's base address, and exact-URL duplicates
//! are dropped first-seen-wins across all adapters of one run.

use std::collections::HashSet;

use crate::models::{Posting, RawCandidate, SiteConfig};
use crate::utils::{collapse_whitespace, resolve_url};

use super::classify::TitleClassifier;

/// Normalizer carrying the within-run dedup state.
pub struct PostingNormalizer {
    classifier: TitleClassifier,
    seen_urls: HashSet<String>,
}

impl PostingNormalizer {
    pub fn new(classifier: TitleClassifier) -> Self {
        Self {
            classifier,
            seen_urls: HashSet::new(),
        }
    }

    /// Convert one raw candidate, or skip it.
    ///
    /// Skips are expected high-frequency noise in markup and are not
    /// reported anywhere.
    pub fn normalize(&mut self, site: &SiteConfig, candidate: RawCandidate) -> Option<Posting> {
        let href = candidate.href.trim();
        let title = collapse_whitespace(&candidate.title);
        if href.is_empty() || title.is_empty() {
            return None;
        }
        if !self.classifier.classify(&site.rules, &title) {
            return None;
        }

        let url = resolve_url(&site.base_url, href)?;
        if !self.seen_urls.insert(url.clone()) {
            return None;
        }

        Some(Posting {
            source: site.id.clone(),
            url,
            title,
        })
    }
}
