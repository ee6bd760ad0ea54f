//! Source adapters.
//!
//! One adapter instance per monitored site, parameterized by its
//! [`SiteConfig`]. An adapter turns a rendered search page into raw
//! `(href, title)` candidates; everything downstream (classification,
//! URL resolution, dedup) happens in the pipeline.

mod interactive;
mod markup;
pub mod parse;

use crate::error::{AppError, Result};
use crate::models::{FetchMode, RawCandidate, RenderConfig, SiteConfig};
use crate::render::RenderSession;

/// Adapter for a single configured site.
pub struct SiteAdapter<'a> {
    site: &'a SiteConfig,
    render: &'a RenderConfig,
}

impl<'a> SiteAdapter<'a> {
    pub fn new(site: &'a SiteConfig, render: &'a RenderConfig) -> Self {
        Self { site, render }
    }

    /// Fetch raw candidates from this site.
    ///
    /// An error means the site contributed nothing this run; the caller
    /// logs it and continues with the other sites.
    pub async fn fetch(&self, session: &mut dyn RenderSession) -> Result<Vec<RawCandidate>> {
        let result = match self.site.mode {
            FetchMode::Markup => markup::fetch(self.site, self.render, session).await,
            FetchMode::Interactive => interactive::fetch(self.site, self.render, session).await,
        };
        result.map_err(|e| AppError::adapter(&self.site.id, e))
    }
}
