//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scheduling and persistence settings
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Page rendering behavior settings
    #[serde(default)]
    pub render: RenderConfig,

    /// Notification transport settings
    #[serde(default)]
    pub email: EmailConfig,

    /// Case-insensitive substrings that disqualify a title on every site
    #[serde(default = "defaults::excluded_title_tokens")]
    pub excluded_title_tokens: Vec<String>,

    /// Monitored career sites
    #[serde(default = "defaults::default_sites")]
    pub sites: Vec<SiteConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.render.user_agent.trim().is_empty() {
            return Err(AppError::config("render.user_agent is empty"));
        }
        if self.render.timeout_secs == 0 {
            return Err(AppError::config("render.timeout_secs must be > 0"));
        }
        if self.render.wait_timeout_secs == 0 {
            return Err(AppError::config("render.wait_timeout_secs must be > 0"));
        }
        if self.monitor.check_interval_secs == 0 {
            return Err(AppError::config("monitor.check_interval_secs must be > 0"));
        }
        if self.monitor.seen_file.trim().is_empty() {
            return Err(AppError::config("monitor.seen_file is empty"));
        }
        if self.sites.is_empty() {
            return Err(AppError::config("No sites defined"));
        }

        let mut ids = std::collections::HashSet::new();
        for site in &self.sites {
            if site.id.trim().is_empty() {
                return Err(AppError::config("Site with empty id"));
            }
            if !ids.insert(site.id.as_str()) {
                return Err(AppError::config(format!("Duplicate site id: {}", site.id)));
            }
            if site.search_url.trim().is_empty() {
                return Err(AppError::config(format!("Site {}: empty search_url", site.id)));
            }
            let base = Url::parse(&site.base_url)
                .map_err(|e| AppError::config(format!("Site {}: bad base_url: {e}", site.id)))?;
            if base.host_str().is_none() {
                return Err(AppError::config(format!(
                    "Site {}: base_url has no host",
                    site.id
                )));
            }
            if site.mode == FetchMode::Interactive && site.max_interactions == 0 {
                return Err(AppError::config(format!(
                    "Site {}: max_interactions must be > 0 for interactive mode",
                    site.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            render: RenderConfig::default(),
            email: EmailConfig::default(),
            excluded_title_tokens: defaults::excluded_title_tokens(),
            sites: defaults::default_sites(),
        }
    }
}

/// Scheduling and persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between checks in watch mode
    #[serde(default = "defaults::check_interval")]
    pub check_interval_secs: u64,

    /// Path of the seen-postings file
    #[serde(default = "defaults::seen_file")]
    pub seen_file: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            check_interval_secs: defaults::check_interval(),
            seen_file: defaults::seen_file(),
        }
    }
}

/// Page rendering behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// User-Agent header for page requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Navigation timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Upper bound for marker / address-change waits, in seconds
    #[serde(default = "defaults::wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Re-check interval while waiting, in milliseconds
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            wait_timeout_secs: defaults::wait_timeout(),
            poll_interval_ms: defaults::poll_interval(),
        }
    }
}

/// Notification transport settings.
///
/// The sender identity and credential are not part of the config file;
/// they come from the `EMAIL_USER` / `EMAIL_PASSWORD` environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay host
    #[serde(default = "defaults::smtp_host")]
    pub smtp_host: String,

    /// Addresses to notify when new postings are found
    #[serde(default)]
    pub recipients: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: defaults::smtp_host(),
            recipients: Vec::new(),
        }
    }
}

/// How a site's postings are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchMode {
    /// Posting links are present as anchors in the listing markup
    #[default]
    Markup,

    /// Posting addresses are only reachable by activating a card and
    /// observing where the page navigates
    Interactive,
}

/// Pattern identifying posting elements in a site's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPattern {
    /// Anchor href starts with this prefix
    HrefPrefix(String),

    /// Anchor href contains this substring
    HrefContains(String),

    /// Element carries this attribute
    AttrPresent(String),
}

impl MarkerPattern {
    /// Whether a raw href value satisfies an href-based marker.
    ///
    /// Attribute markers match on element shape, not href, so they
    /// accept any href here.
    pub fn matches_href(&self, href: &str) -> bool {
        match self {
            Self::HrefPrefix(prefix) => href.starts_with(prefix.as_str()),
            Self::HrefContains(needle) => href.contains(needle.as_str()),
            Self::AttrPresent(_) => true,
        }
    }
}

/// One monitored career site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Short stable identifier, used as `Posting::source`
    pub id: String,

    /// Human-readable site name for reports
    pub name: String,

    /// Base address relative hrefs are resolved against
    pub base_url: String,

    /// Pre-filtered search page to render
    pub search_url: String,

    /// Fetch strategy
    #[serde(default)]
    pub mode: FetchMode,

    /// Pattern marking posting elements on the search page
    pub marker: MarkerPattern,

    /// Upper bound on click-throughs per run (interactive mode)
    #[serde(default = "defaults::max_interactions")]
    pub max_interactions: usize,

    /// Title relevance rules for this site
    #[serde(default)]
    pub rules: TitleRules,
}

/// Declarative title relevance rules, evaluated by one shared engine.
///
/// Deny tokens always win over allow prefixes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleRules {
    /// Reject when any of these is a substring of the lower-cased title
    #[serde(default)]
    pub deny_tokens: Vec<String>,

    /// When non-empty, accept only titles starting with one of these
    #[serde(default)]
    pub allow_prefixes: Vec<String>,

    /// When set, accept only titles containing this substring
    #[serde(default)]
    pub require_substring: Option<String>,
}

mod defaults {
    use super::{FetchMode, MarkerPattern, SiteConfig, TitleRules};

    // Render defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobwatch/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn wait_timeout() -> u64 {
        10
    }
    pub fn poll_interval() -> u64 {
        500
    }

    // Monitor defaults
    pub fn check_interval() -> u64 {
        1800
    }
    pub fn seen_file() -> String {
        "seen_jobs.txt".into()
    }

    // Email defaults
    pub fn smtp_host() -> String {
        "smtp.gmail.com".into()
    }

    // Site defaults
    pub fn max_interactions() -> usize {
        6
    }

    pub fn excluded_title_tokens() -> Vec<String> {
        vec![
            "intern".into(),
            "director".into(),
            "vice president".into(),
            "recruiter".into(),
        ]
    }

    pub fn default_sites() -> Vec<SiteConfig> {
        vec![
            SiteConfig {
                id: "gs".to_string(),
                name: "Goldman Sachs".to_string(),
                base_url: "https://higher.gs.com".to_string(),
                search_url: "https://higher.gs.com/results?EXPERIENCE_LEVEL=Analyst|Associate\
                             &JOB_FUNCTION=Software%20Engineering&page=1&sort=POSTED_DATE"
                    .to_string(),
                mode: FetchMode::Markup,
                marker: MarkerPattern::HrefPrefix("/roles/".to_string()),
                max_interactions: max_interactions(),
                rules: TitleRules {
                    deny_tokens: Vec::new(),
                    allow_prefixes: Vec::new(),
                    require_substring: Some("engineer".to_string()),
                },
            },
            SiteConfig {
                id: "twosigma".to_string(),
                name: "Two Sigma".to_string(),
                base_url: "https://careers.twosigma.com".to_string(),
                search_url: "https://careers.twosigma.com/careers/SearchJobs/?listFilterMode=1"
                    .to_string(),
                mode: FetchMode::Markup,
                marker: MarkerPattern::HrefContains("/careers/JobDetail/".to_string()),
                max_interactions: max_interactions(),
                rules: TitleRules {
                    deny_tokens: vec![
                        "senior".into(),
                        "staff".into(),
                        "manager".into(),
                        "lead".into(),
                    ],
                    allow_prefixes: vec![
                        "software engineer".into(),
                        "quantitative software engineer".into(),
                    ],
                    require_substring: None,
                },
            },
            SiteConfig {
                id: "imc".to_string(),
                name: "IMC Trading".to_string(),
                base_url: "https://careers.imc.com".to_string(),
                search_url: "https://careers.imc.com/us/en/search-results?keywords=software"
                    .to_string(),
                mode: FetchMode::Interactive,
                marker: MarkerPattern::AttrPresent("data-ph-at-job-title-text".to_string()),
                max_interactions: max_interactions(),
                rules: TitleRules {
                    deny_tokens: vec!["senior".into(), "principal".into(), "lead".into()],
                    allow_prefixes: vec![
                        "software engineer".into(),
                        "graduate software engineer".into(),
                    ],
                    require_substring: None,
                },
            },
        ]
    }
}
