// src/pipeline/check.rs

//! Single check run: fetch every site, detect new postings, notify,
//! persist.

use crate::error::Result;
use crate::models::{Config, Posting};
use crate::notify::Notifier;
use crate::render::{HttpSession, RenderSession};
use crate::storage::SeenStore;

use crate::adapters::SiteAdapter;

use super::classify::TitleClassifier;
use super::detect::detect_new;
use super::normalize::PostingNormalizer;

/// Summary of one check run.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// All postings gathered this run, in encounter order
    pub postings: Vec<Posting>,
    /// Subset not present in the seen set
    pub new_postings: Vec<Posting>,
    /// Whether a notification went out
    pub notified: bool,
    /// Whether the new postings were appended to the seen set
    pub persisted: bool,
    /// Sites that contributed nothing due to fetch failure
    pub sites_failed: usize,
}

/// Fetch every configured site and normalize the results.
///
/// A failing site is logged and skipped; it never aborts the others.
pub async fn gather_postings(
    config: &Config,
    session: &mut dyn RenderSession,
) -> (Vec<Posting>, usize) {
    let classifier = TitleClassifier::new(&config.excluded_title_tokens);
    let mut normalizer = PostingNormalizer::new(classifier);

    let mut postings = Vec::new();
    let mut failures = 0;

    for site in &config.sites {
        let adapter = SiteAdapter::new(site, &config.render);
        match adapter.fetch(session).await {
            Ok(candidates) => {
                let found = candidates.len();
                let before = postings.len();
                for candidate in candidates {
                    if let Some(posting) = normalizer.normalize(site, candidate) {
                        postings.push(posting);
                    }
                }
                log::info!(
                    "{}: kept {} of {found} candidates",
                    site.id,
                    postings.len() - before
                );
            }
            Err(e) => {
                failures += 1;
                log::warn!("{e}");
            }
        }
    }

    (postings, failures)
}

/// Run one check against an existing session.
///
/// The seen set is appended only after a successful notification, so a
/// failed send leaves the postings to be re-detected next run. Storage
/// errors propagate and abort the run.
pub async fn run_check(
    config: &Config,
    session: &mut dyn RenderSession,
    store: &dyn SeenStore,
    notifier: &dyn Notifier,
) -> Result<CheckOutcome> {
    let seen = store.load().await?;
    log::info!("Loaded {} previously seen postings", seen.len());

    let (postings, sites_failed) = gather_postings(config, session).await;
    let new_postings = detect_new(&postings, &seen);

    if new_postings.is_empty() {
        log::info!(
            "No new postings ({} current, {sites_failed} site(s) failed)",
            postings.len()
        );
        return Ok(CheckOutcome {
            postings,
            new_postings,
            notified: false,
            persisted: false,
            sites_failed,
        });
    }

    log::info!("Detected {} new postings", new_postings.len());

    let notified = match notifier.notify(&new_postings).await {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Notification not sent, postings will be retried next run: {e}");
            false
        }
    };

    let mut persisted = false;
    if notified {
        let urls: Vec<String> = new_postings.iter().map(|p| p.url.clone()).collect();
        store.append_all(&urls).await?;
        persisted = true;
    }

    Ok(CheckOutcome {
        postings,
        new_postings,
        notified,
        persisted,
        sites_failed,
    })
}

/// Run one check with a fresh HTTP-backed session.
///
/// The session is torn down on every exit path.
pub async fn run_once(
    config: &Config,
    store: &dyn SeenStore,
    notifier: &dyn Notifier,
) -> Result<CheckOutcome> {
    let mut session = HttpSession::new(&config.render)?;
    let result = run_check(config, &mut session, store, notifier).await;
    if let Err(e) = session.close().await {
        log::warn!("Session teardown failed: {e}");
    }
    result
}
