//! Render capability seam.
//!
//! Adapters obtain page content exclusively through [`RenderSession`], so
//! the extraction pipeline never depends on a concrete rendering engine.
//! Two implementations ship with the crate:
//!
//! - [`HttpSession`]: plain HTTP fetching for sites whose listing markup
//!   is served statically
//! - [`ScriptedSession`]: canned pages and scripted navigation for tests

pub mod http;
pub mod mock;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::MarkerPattern;

pub use http::HttpSession;
pub use mock::ScriptedSession;

/// Condition a session can be asked to wait for, with a bounded timeout.
#[derive(Debug, Clone)]
pub enum WaitFor {
    /// At least one element matching the marker is present
    Marker(MarkerPattern),

    /// The current address differs from the given one
    AddressChange { from: String },
}

/// A serially-used page rendering session.
///
/// All waits are best-effort: `wait_for` reports whether the condition was
/// met within the timeout and never blocks past it. The session must be
/// closed on every exit path of a run.
#[async_trait]
pub trait RenderSession: Send {
    /// Navigate to a URL and load its rendered document.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Address of the currently loaded document.
    fn current_address(&self) -> String;

    /// Text of the currently loaded document.
    fn document_text(&self) -> String;

    /// Wait until the condition holds or the timeout elapses.
    ///
    /// Returns `Ok(true)` when the condition was observed, `Ok(false)` on
    /// timeout.
    async fn wait_for(&mut self, condition: &WaitFor, timeout: Duration) -> Result<bool>;

    /// Activate the `index`-th element matching the marker (simulated
    /// click). Errors when the backend cannot interact.
    async fn activate(&mut self, marker: &MarkerPattern, index: usize) -> Result<()>;

    /// Return to the previously loaded address.
    async fn back(&mut self) -> Result<()>;

    /// Tear the session down.
    async fn close(&mut self) -> Result<()>;
}
