//! Bounded click-through fetch mode.
//!
//! For sites whose canonical posting addresses are only reachable by
//! activating a card and observing where the page navigates. Each run
//! performs at most `max_interactions` activations; any failure mid-loop
//! abandons the remaining iterations for that site and keeps whatever was
//! already collected.

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
        log::debug!(
            "{}: marker not seen within {}s, proceeding with current content",
            site.id,
            render.wait_timeout_secs
        );
    }

    let total = parse::count_targets(&session.document_text(), &site.marker)?;
    let count = total.min(site.max_interactions);
    if count < total {
        log::debug!(
            "{}: visiting {count} of {total} targets this run",
            site.id
        );
    }

    let mut candidates = Vec::new();
    for index in 0..count {
        let listing_address = session.current_address();
        let title = parse::heading_near(&session.document_text(), &site.marker, index)
            .unwrap_or_default();

        if let Err(e) = session.activate(&site.marker, index).await {
            log::warn!("{}: activation {index} failed: {e}", site.id);
            break;
        }

        match session
            .wait_for(
                &WaitFor::AddressChange {
                    from: listing_address.clone(),
                },
                wait,
            )
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("{}: address unchanged after activation {index}", site.id);
                break;
            }
            Err(e) => {
                log::warn!("{}: wait after activation {index} failed: {e}", site.id);
                break;
            }
        }

        candidates.push(RawCandidate::new(session.current_address(), title));

        if let Err(e) = session.back().await {
            log::warn!("{}: return to listing failed after {index}: {e}", site.id);
            break;
        }
        match session
            .wait_for(&WaitFor::Marker(site.marker.clone()), wait)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                log::warn!("{}: listing did not recover after activation {index}", site.id);
                break;
            }
            Err(e) => {
                log::warn!("{}: listing wait failed after {index}: {e}", site.id);
                break;
            }
        }
    }

    Ok(candidates)
}
