//! Seen-set persistence.
//!
//! The seen set is the process-external record of posting URLs that have
//! already been notified: one opaque URL per line, UTF-8, no header.
//! It only grows, except for the explicit reinitialize operation.

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::FileSeenStore;

/// Trait for seen-set storage backends.
///
/// Not safe for concurrent runs; callers must serialize load/append/
/// overwrite externally. I/O failures propagate: losing the seen set
/// silently would re-notify everything on every subsequent run.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Load previously notified posting URLs.
    ///
    /// Missing storage is an empty set, never an error. Duplicate and
    /// blank lines on disk are tolerated and collapsed.
    async fn load(&self) -> Result<HashSet<String>>;

    /// Durably append identifiers. No-op on empty input.
    async fn append_all(&self, urls: &[String]) -> Result<()>;

    /// Atomically replace all persisted state with exactly these
    /// identifiers.
    async fn overwrite(&self, urls: &[String]) -> Result<()>;
}
