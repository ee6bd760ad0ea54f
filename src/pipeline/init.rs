//! Seen-set initialization.
//!
//! Records every currently visible posting without notifying, so
//! monitoring can be armed without alerting on pre-existing jobs.

use crate::error::Result;
use crate::models::Config;
use crate::render::{HttpSession, RenderSession};
use crate::storage::SeenStore;

use super::check::gather_postings;

/// Summary of an initialization run.
#[derive(Debug, Clone)]
pub struct InitOutcome {
    /// Number of postings recorded as seen
    pub recorded: usize,
    /// Sites that contributed nothing due to fetch failure
    pub sites_failed: usize,
}

/// Replace the seen set with the current snapshot.
pub async fn run_init(
    config: &Config,
    session: &mut dyn RenderSession,
    store: &dyn SeenStore,
) -> Result<InitOutcome> {
    let (postings, sites_failed) = gather_postings(config, session).await;
    let urls: Vec<String> = postings.iter().map(|p| p.url.clone()).collect();

    store.overwrite(&urls).await?;
    log::info!("Initialized seen set with {} postings", urls.len());

    Ok(InitOutcome {
        recorded: urls.len(),
        sites_failed,
    })
}

/// Run initialization with a fresh HTTP-backed session.
pub async fn run_init_once(config: &Config, store: &dyn SeenStore) -> Result<InitOutcome> {
    let mut session = HttpSession::new(&config.render)?;
    let result = run_init(config, &mut session, store).await;
    if let Err(e) = session.close().await {
        log::warn!("Session teardown failed: {e}");
    }
    result
}
