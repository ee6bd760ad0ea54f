//! Change detection against the persisted seen set.

use std::collections::HashSet;

use crate::models::Posting;

/// Filter the current postings down to those not yet seen.
///
/// Pure function; encounter order is preserved (site by site, then
/// within-site order as produced by the adapters).
pub fn detect_new(current: &[Posting], seen: &HashSet<String>) -> Vec<Posting> {
    current
        .iter()
        .filter(|posting| !seen.contains(&posting.url))
        .cloned()
        .collect()
}
