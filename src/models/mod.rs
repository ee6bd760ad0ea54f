// src/models/mod.rs

//! Domain models for the job monitor.

mod config;
mod posting;

// Re-export all public types
pub use config::{
    Config, EmailConfig, FetchMode, MarkerPattern, MonitorConfig, RenderConfig, SiteConfig,
    TitleRules,
};
pub use posting::{Posting, RawCandidate};
