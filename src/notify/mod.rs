//! Notification dispatch.
//!
//! Report building lives here; the actual transport sits behind the
//! [`Notifier`] boundary so runs can be exercised without SMTP.

pub mod email;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Local;

use crate::error::Result;
use crate::models::Posting;

pub use email::EmailNotifier;

/// Sink for new-posting reports.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a report for the given new postings.
    ///
    /// Empty input must be a no-op. A returned error means "not sent";
    /// the caller decides what that implies for persistence.
    async fn notify(&self, new_postings: &[Posting]) -> Result<()>;
}

/// Group postings by source, preserving source encounter order and
/// within-group insertion order.
pub fn group_by_source(postings: &[Posting]) -> Vec<(&str, Vec<&Posting>)> {
    let mut groups: Vec<(&str, Vec<&Posting>)> = Vec::new();
    for posting in postings {
        match groups.iter_mut().find(|(source, _)| *source == posting.source) {
            Some((_, members)) => members.push(posting),
            None => groups.push((posting.source.as_str(), vec![posting])),
        }
    }
    groups
}

/// Subject line for a new-postings report.
pub fn subject(count: usize) -> String {
    format!(
        "{count} new job posting{} detected at {}",
        if count == 1 { "" } else { "s" },
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// HTML report body: one section per source, each posting as a link.
pub fn html_body(postings: &[Posting], source_names: &HashMap<String, String>) -> String {
    let mut body = String::from("<p>The following new job postings were detected:</p>\n");
    for (source, members) in group_by_source(postings) {
        let heading = source_names.get(source).map(String::as_str).unwrap_or(source);
        body.push_str(&format!("<h3>{}</h3>\n<ul>\n", html_escape::encode_text(heading)));
        for posting in members {
            body.push_str(&format!(
                "  <li><a href=\"{}\">{}</a></li>\n",
                html_escape::encode_double_quoted_attribute(&posting.url),
                html_escape::encode_text(&posting.title),
            ));
        }
        body.push_str("</ul>\n");
    }
    body
}

/// Plain-text sibling of the HTML report, for console output and logs.
pub fn text_body(postings: &[Posting], source_names: &HashMap<String, String>) -> String {
    let mut body = String::new();
    for (source, members) in group_by_source(postings) {
        let heading = source_names.get(source).map(String::as_str).unwrap_or(source);
        body.push_str(heading);
        body.push('\n');
        for posting in members {
            body.push_str(&format!("- {}: {}\n", posting.title, posting.url));
        }
    }
    body
}
