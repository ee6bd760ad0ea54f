//! Marker-driven extraction from rendered markup.
//!
//! All scraper usage lives here; sessions and adapters pass document text
//! in and get owned values back, so no parsed DOM is ever held across an
//! await point.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{MarkerPattern, RawCandidate};

/// CSS selector matching the marker's element shape.
fn marker_selector(marker: &MarkerPattern) -> Result<Selector> {
    let css = match marker {
        MarkerPattern::AttrPresent(attr) => format!("[{attr}]"),
        _ => "a[href]".to_string(),
    };
    Selector::parse(&css).map_err(|e| AppError::selector(&css, format!("{e:?}")))
}

fn element_matches(element: &ElementRef<'_>, marker: &MarkerPattern) -> bool {
    match marker {
        MarkerPattern::AttrPresent(_) => true,
        _ => element
            .value()
            .attr("href")
            .is_some_and(|href| marker.matches_href(href)),
    }
}

fn collapse(text: impl Iterator<Item = impl AsRef<str>>) -> String {
    let joined: String = text.map(|t| t.as_ref().to_string()).collect();
    crate::utils::collapse_whitespace(&joined)
}

/// Whether at least one element matching the marker is present.
///
/// Used by wait loops; an unparseable marker counts as "not present".
pub fn marker_present(html: &str, marker: &MarkerPattern) -> bool {
    let Ok(selector) = marker_selector(marker) else {
        return false;
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .any(|element| element_matches(&element, marker))
}

/// Extract `(href, visible text)` pairs for every marker element.
///
/// Elements without an href are skipped; blank titles are kept and left
/// for the normalizer to drop.
pub fn extract_candidates(html: &str, marker: &MarkerPattern) -> Result<Vec<RawCandidate>> {
    let selector = marker_selector(marker)?;
    let document = Html::parse_document(html);

    let mut candidates = Vec::new();
    for element in document.select(&selector) {
        if !element_matches(&element, marker) {
            continue;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let title = collapse(element.text());
        candidates.push(RawCandidate::new(href, title));
    }
    Ok(candidates)
}

/// Number of elements matching the marker, for bounded click-through.
pub fn count_targets(html: &str, marker: &MarkerPattern) -> Result<usize> {
    let selector = marker_selector(marker)?;
    let document = Html::parse_document(html);
    Ok(document
        .select(&selector)
        .filter(|element| element_matches(element, marker))
        .count())
}

/// Best-effort title for the `index`-th marker element.
///
/// Prefers a heading inside the element, then the first heading under an
/// enclosing container, then the element's own text. Call-to-action
/// targets usually read "Learn more", so their own text comes last.
pub fn heading_near(html: &str, marker: &MarkerPattern, index: usize) -> Option<String> {
    let selector = marker_selector(marker).ok()?;
    let heading_selector = Selector::parse("h1, h2, h3, h4").ok()?;
    let document = Html::parse_document(html);

    let target = document
        .select(&selector)
        .filter(|element| element_matches(element, marker))
        .nth(index)?;

    if let Some(heading) = target.select(&heading_selector).next() {
        let text = collapse(heading.text());
        if !text.is_empty() {
            return Some(text);
        }
    }

    for ancestor in target.ancestors() {
        let Some(container) = ElementRef::wrap(ancestor) else {
            continue;
        };
        if let Some(heading) = container.select(&heading_selector).next() {
            let text = collapse(heading.text());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    let own = collapse(target.text());
    if own.is_empty() { None } else { Some(own) }
}
