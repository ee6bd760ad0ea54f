//! Anchor-scan fetch mode.
//!
//! For sites whose posting links are present in the listing markup once
//! the page has rendered.

use std::time::Duration;

use crate::error::Result;
use crate::models::{RawCandidate, RenderConfig, SiteConfig};
use crate::render::{RenderSession, WaitFor};

use super::parse;

pub(super) async fn fetch(
    site: &SiteConfig,
    render: &RenderConfig,
    session: &mut dyn RenderSession,
) -> Result<Vec<RawCandidate>> {
    session.navigate(&site.search_url).await?;

    let wait = Duration::from_secs(render.wait_timeout_secs);
    let appeared = session
        .wait_for(&WaitFor::Marker(site.marker.clone()), wait)
        .await?;
    if !appeared {
        // Best-effort: parse whatever is there rather than failing.
        log::debug!(
            "{}: marker not seen within {}s, parsing current content",
            site.id,
            render.wait_timeout_secs
        );
    }

    parse::extract_candidates(&session.document_text(), &site.marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FetchMode, MarkerPattern, TitleRules};
    use crate::render::ScriptedSession;

    fn site(search_url: &str) -> SiteConfig {
        SiteConfig {
            id: "test".to_string(),
            name: "Test Site".to_string(),
            base_url: "https://example.com".to_string(),
            search_url: search_url.to_string(),
            mode: FetchMode::Markup,
            marker: MarkerPattern::HrefPrefix("/roles/".to_string()),
            max_interactions: 6,
            rules: TitleRules::default(),
        }
    }

    #[tokio::test]
    async fn test_fetch_extracts_matching_anchors() {
        let html = r#"
            <a href="/roles/1">Software Engineer</a>
            <a href="/roles/2">Data Engineer</a>
            <a href="/legal">Legal notices</a>
        "#;
        let mut session = ScriptedSession::new().with_page("https://example.com/jobs", html);

        let site = site("https://example.com/jobs");
        let candidates = fetch(&site, &RenderConfig::default(), &mut session)
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], RawCandidate::new("/roles/1", "Software Engineer"));
        assert_eq!(candidates[1], RawCandidate::new("/roles/2", "Data Engineer"));
    }

    #[tokio::test]
    async fn test_fetch_parses_even_when_marker_never_appears() {
        // Marker wait times out but parsing still runs on the content.
        let mut session =
            ScriptedSession::new().with_page("https://example.com/jobs", "<p>loading…</p>");

        let site = site("https://example.com/jobs");
        let candidates = fetch(&site, &RenderConfig::default(), &mut session)
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_propagates_navigation_failure() {
        let mut session = ScriptedSession::new().with_unreachable("https://example.com/jobs");

        let site = site("https://example.com/jobs");
        let result = fetch(&site, &RenderConfig::default(), &mut session).await;
        assert!(result.is_err());
    }
}
