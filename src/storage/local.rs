//! File-backed seen store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::SeenStore;

/// Seen store persisting to a local line-oriented text file.
#[derive(Debug, Clone)]
pub struct FileSeenStore {
    path: PathBuf,
}

impl FileSeenStore {
    /// Create a store rooted at the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    fn join_lines(urls: &[String]) -> String {
        let mut buffer = String::new();
        for url in urls {
            buffer.push_str(url);
            buffer.push('\n');
        }
        buffer
    }
}

#[async_trait]
impl SeenStore for FileSeenStore {
    async fn load(&self) -> Result<HashSet<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashSet::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn append_all(&self, urls: &[String]) -> Result<()> {
        if urls.is_empty() {
            return Ok(());
        }
        self.ensure_parent().await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(Self::join_lines(urls).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn overwrite(&self, urls: &[String]) -> Result<()> {
        self.ensure_parent().await?;

        // Write to a temp file, then rename: a crash mid-write leaves the
        // prior state intact.
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(Self::join_lines(urls).as_bytes()).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn urls(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        store
            .append_all(&urls(&["https://example.com/roles/1", "https://example.com/roles/2"]))
            .await
            .unwrap();
        store
            .append_all(&urls(&["https://example.com/roles/3"]))
            .await
            .unwrap();

        let seen = store.load().await.unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.contains("https://example.com/roles/2"));
    }

    #[tokio::test]
    async fn test_append_empty_is_a_noop() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        store.append_all(&[]).await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_append_grows_monotonically() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        store.append_all(&urls(&["https://example.com/1"])).await.unwrap();
        let first = store.load().await.unwrap();

        store.append_all(&urls(&["https://example.com/2"])).await.unwrap();
        let second = store.load().await.unwrap();

        assert!(second.is_superset(&first));
    }

    #[tokio::test]
    async fn test_load_collapses_duplicates_and_blank_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("seen_jobs.txt");
        tokio::fs::write(&path, "https://example.com/1\n\nhttps://example.com/1\n  \n")
            .await
            .unwrap();

        let store = FileSeenStore::new(&path);
        let seen = store.load().await.unwrap();
        assert_eq!(seen.len(), 1);
    }

    #[tokio::test]
    async fn test_overwrite_is_exact_replacement() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        store
            .append_all(&urls(&["https://example.com/old-1", "https://example.com/old-2"]))
            .await
            .unwrap();
        store
            .overwrite(&urls(&["https://example.com/new-1"]))
            .await
            .unwrap();

        let seen = store.load().await.unwrap();
        let expected: HashSet<String> = urls(&["https://example.com/new-1"]).into_iter().collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_overwrite_with_empty_clears() {
        let tmp = TempDir::new().unwrap();
        let store = FileSeenStore::new(tmp.path().join("seen_jobs.txt"));

        store.append_all(&urls(&["https://example.com/1"])).await.unwrap();
        store.overwrite(&[]).await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }
}
