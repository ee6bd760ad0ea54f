//! HTTP-backed render session.
//!
//! Serves sites whose listing markup arrives in the initial response.
//! Marker waits are honored by re-fetching the current address at the
//! configured poll interval until the deadline; activation is not
//! supported, so interactive sites degrade to "contributed nothing".

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::adapters::parse;
use crate::error::{AppError, Result};
use crate::models::{MarkerPattern, RenderConfig};
use crate::render::{RenderSession, WaitFor};

/// Render session backed by a plain HTTP client.
pub struct HttpSession {
    client: reqwest::Client,
    poll_interval: Duration,
    address: String,
    body: String,
    history: Vec<String>,
}

impl HttpSession {
    /// Create a session with the configured user agent and timeouts.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
            address: String::new(),
            body: String::new(),
            history: Vec::new(),
        })
    }

    async fn fetch(&mut self, url: &str) -> Result<()> {
        let response = self.client.get(url).send().await?;
        // Redirects may move us; record where we actually landed.
        let final_url = response.url().to_string();
        self.body = response.text().await?;
        self.address = final_url;
        Ok(())
    }
}

#[async_trait]
impl RenderSession for HttpSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let previous = self.address.clone();
        self.fetch(url).await?;
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

    async fn wait_for(&mut self, condition: &WaitFor, timeout: Duration) -> Result<bool> {
        match condition {
            WaitFor::Marker(marker) => {
                let deadline = Instant::now() + timeout;
                loop {
                    if parse::marker_present(&self.body, marker) {
                        return Ok(true);
                    }
                    if Instant::now() >= deadline {
                        return Ok(false);
                    }
                    tokio::time::sleep(self.poll_interval).await;

                    let address = self.address.clone();
                    if let Err(e) = self.fetch(&address).await {
                        log::debug!("refresh of {address} failed while waiting: {e}");
                    }
                }
            }
            // Addresses only change through explicit navigation on this
            // backend, so the condition is decidable immediately.
            WaitFor::AddressChange { from } => Ok(self.address != *from),
        }
    }

    async fn activate(&mut self, _marker: &MarkerPattern, _index: usize) -> Result<()> {
        Err(AppError::render(
            "activate",
            "static HTTP backend cannot simulate activation",
        ))
    }

    async fn back(&mut self) -> Result<()> {
        let previous = self
            .history
            .pop()
            .ok_or_else(|| AppError::render("back", "no prior address in history"))?;
        self.fetch(&previous).await
    }

    async fn close(&mut self) -> Result<()> {
        self.history.clear();
        Ok(())
    }
}
