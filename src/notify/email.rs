//! SMTP email notifier.
//!
//! The sender identity and credential come from the `EMAIL_USER` /
//! `EMAIL_PASSWORD` environment variables. Missing secrets make sending
//! fail with a reported error, never a panic, so a run without them
//! simply leaves the postings unpersisted for a later retry.

use std::collections::HashMap;

use async_trait::async_trait;
use lettre::message::{Mailbox, Message, header};
use lettre::transport::smtp::AsyncSmtpTransport;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncTransport, Tokio1Executor};

use crate::error::{AppError, Result};
use crate::models::{EmailConfig, Posting, SiteConfig};
use crate::notify::{Notifier, html_body, subject};

/// Notifier delivering reports over SMTP.
pub struct EmailNotifier {
    config: EmailConfig,
    source_names: HashMap<String, String>,
    credentials: Option<(String, String)>,
}

impl EmailNotifier {
    /// Build a notifier, reading secrets from the environment.
    pub fn from_env(config: EmailConfig, sites: &[SiteConfig]) -> Self {
        let credentials = match (std::env::var("EMAIL_USER"), std::env::var("EMAIL_PASSWORD")) {
            (Ok(user), Ok(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        };

        Self {
            config,
            source_names: sites
                .iter()
                .map(|site| (site.id.clone(), site.name.clone()))
                .collect(),
            credentials,
        }
    }

    fn build_message(&self, sender: &str, new_postings: &[Posting]) -> Result<Message> {
        let from: Mailbox = sender.parse()?;
        let mut builder = Message::builder()
            .from(from)
            .subject(subject(new_postings.len()));
        for recipient in &self.config.recipients {
            builder = builder.to(recipient.parse()?);
        }
        Ok(builder
            .header(header::ContentType::TEXT_HTML)
            .body(html_body(new_postings, &self.source_names))?)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, new_postings: &[Posting]) -> Result<()> {
        if new_postings.is_empty() {
            return Ok(());
        }

        let (user, password) = self.credentials.as_ref().ok_or_else(|| {
            AppError::config("EMAIL_USER and EMAIL_PASSWORD must be set to send notifications")
        })?;
        if self.config.recipients.is_empty() {
            return Err(AppError::config("email.recipients is empty"));
        }

        let message = self.build_message(user, new_postings)?;
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)?
            .credentials(Credentials::new(user.clone(), password.clone()))
            .build();

        mailer.send(message).await?;
        log::info!(
            "Sent notification for {} new postings to {} recipient(s)",
            new_postings.len(),
            self.config.recipients.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifier(credentials: Option<(String, String)>, recipients: Vec<String>) -> EmailNotifier {
        EmailNotifier {
            config: EmailConfig {
                smtp_host: "smtp.example.com".to_string(),
                recipients,
            },
            source_names: HashMap::new(),
            credentials,
        }
    }

    fn posting() -> Posting {
        Posting {
            source: "gs".to_string(),
            url: "https://higher.gs.com/roles/42".to_string(),
            title: "Software Engineer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_input_is_a_noop_even_without_credentials() {
        let n = notifier(None, vec![]);
        assert!(n.notify(&[]).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_credentials_reports_not_sent() {
        let n = notifier(None, vec!["dev@example.com".to_string()]);
        let err = n.notify(&[posting()]).await.unwrap_err();
        assert!(err.to_string().contains("EMAIL_USER"));
    }

    #[tokio::test]
    async fn test_missing_recipients_reports_not_sent() {
        let n = notifier(Some(("me@example.com".into(), "secret".into())), vec![]);
        let err = n.notify(&[posting()]).await.unwrap_err();
        assert!(err.to_string().contains("recipients"));
    }

    #[test]
    fn test_build_message_includes_all_recipients() {
        let n = notifier(
            Some(("me@example.com".into(), "secret".into())),
            vec!["a@example.com".to_string(), "b@example.com".to_string()],
        );
        let message = n.build_message("me@example.com", &[posting()]).unwrap();

        let headers = format!("{:?}", message.headers());
        assert!(headers.contains("a@example.com"));
        assert!(headers.contains("b@example.com"));
    }
}
