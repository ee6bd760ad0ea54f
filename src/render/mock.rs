//! Scripted render session for tests.
//!
//! Holds canned pages keyed by URL plus scripted activation targets, so
//! adapter and pipeline behavior can be exercised with zero network or
//! browser dependency.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::parse;
use crate::error::{AppError, Result};
use crate::models::MarkerPattern;
use crate::render::{RenderSession, WaitFor};

/// Render session replaying scripted pages and navigations.
#[derive(Default)]
pub struct ScriptedSession {
    /// Canned documents keyed by address
    pages: HashMap<String, String>,

    /// Activation targets keyed by (listing address, element index)
    activations: HashMap<(String, usize), String>,

    /// Addresses whose navigation fails outright
    unreachable: HashSet<String>,

    address: String,
    body: String,
    history: Vec<String>,
    navigations: Vec<String>,
    closed: bool,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page (builder pattern).
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Script the destination of activating the `index`-th marker element
    /// on the given listing page.
    pub fn with_activation(
        mut self,
        listing_url: impl Into<String>,
        index: usize,
        destination: impl Into<String>,
    ) -> Self {
        self.activations
            .insert((listing_url.into(), index), destination.into());
        self
    }

    /// Make navigation to an address fail.
    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.unreachable.insert(url.into());
        self
    }

    /// Addresses requested via `navigate`, in order.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn load(&mut self, address: String) {
        self.body = self.pages.get(&address).cloned().unwrap_or_default();
        self.address = address;
    }
}

#[async_trait]
impl RenderSession for ScriptedSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        if self.unreachable.contains(url) {
            return Err(AppError::render("navigate", format!("{url} unreachable")));
        }

        let previous = self.address.clone();
        self.load(url.to_string());
        if !previous.is_empty() {
            self.history.push(previous);
        }
        Ok(())
    }

    fn current_address(&self) -> String {
        self.address.clone()
    }

    fn document_text(&self) -> String {
        self.body.clone()
    }

    async fn wait_for(&mut self, condition: &WaitFor, _timeout: Duration) -> Result<bool> {
        // Scripted pages never change underneath us, so conditions are
        // decidable immediately and no time passes.
        match condition {
            WaitFor::Marker(marker) => Ok(parse::marker_present(&self.body, marker)),
            WaitFor::AddressChange { from } => Ok(self.address != *from),
        }
    }

    async fn activate(&mut self, _marker: &MarkerPattern, index: usize) -> Result<()> {
        let key = (self.address.clone(), index);
        let destination = self
            .activations
            .get(&key)
            .cloned()
            .ok_or_else(|| AppError::render("activate", format!("no script for index {index}")))?;

        self.history.push(self.address.clone());
        self.load(destination);
        Ok(())
    }

    async fn back(&mut self) -> Result<()> {
        let previous = self
            .history
            .pop()
            .ok_or_else(|| AppError::render("back", "no prior address in history"))?;
        self.load(previous);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<a href="/roles/1">Software Engineer</a>"#;

    #[tokio::test]
    async fn test_navigate_and_read() {
        let mut session = ScriptedSession::new().with_page("https://example.com/jobs", LISTING);

        session.navigate("https://example.com/jobs").await.unwrap();
        assert_eq!(session.current_address(), "https://example.com/jobs");
        assert!(session.document_text().contains("/roles/1"));
        assert_eq!(session.navigations(), ["https://example.com/jobs"]);
    }

    #[tokio::test]
    async fn test_unreachable_navigation_fails() {
        let mut session = ScriptedSession::new().with_unreachable("https://down.example.com");
        assert!(session.navigate("https://down.example.com").await.is_err());
    }

    #[tokio::test]
    async fn test_activation_changes_address_and_back_restores() {
        let mut session = ScriptedSession::new()
            .with_page("https://example.com/jobs", LISTING)
            .with_activation("https://example.com/jobs", 0, "https://example.com/roles/1");

        session.navigate("https://example.com/jobs").await.unwrap();
        let marker = MarkerPattern::HrefPrefix("/roles/".into());

        session.activate(&marker, 0).await.unwrap();
        assert_eq!(session.current_address(), "https://example.com/roles/1");

        let changed = session
            .wait_for(
                &WaitFor::AddressChange {
                    from: "https://example.com/jobs".to_string(),
                },
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        assert!(changed);

        session.back().await.unwrap();
        assert_eq!(session.current_address(), "https://example.com/jobs");
    }

    #[tokio::test]
    async fn test_close_marks_session_closed() {
        let mut session = ScriptedSession::new();
        assert!(!session.is_closed());
        session.close().await.unwrap();
        assert!(session.is_closed());
    }

    #[tokio::test]
    async fn test_wait_for_marker_absent() {
        let mut session =
            ScriptedSession::new().with_page("https://example.com/empty", "<p>nothing</p>");

        session.navigate("https://example.com/empty").await.unwrap();
        let found = session
            .wait_for(
                &WaitFor::Marker(MarkerPattern::HrefPrefix("/roles/".into())),
                Duration::from_secs(1),
            )
            .await
            .unwrap();
        assert!(!found);
    }
}
