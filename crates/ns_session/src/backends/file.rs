use async_trait::async_trait;
use ns_core::Result;
use std::path::{Path, PathBuf};

use crate::history::HistoryStore;

/// Newline-delimited history file, rewritten wholesale on every persist.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<Vec<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(text.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, entries.join("\n")).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::write(&self.path, "").await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileHistoryStore::new(dir.path().join("history.txt"));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persist_round_trips() {
        let dir = tempdir().unwrap();
        let store = FileHistoryStore::new(dir.path().join("history.txt"));

        let entries = vec!["climate".to_string(), "elections".to_string()];
        store.persist(&entries).await.unwrap();
        assert_eq!(store.load().await.unwrap(), entries);

        // Overwrite, not append
        let replacement = vec!["space".to_string()];
        store.persist(&replacement).await.unwrap();
        assert_eq!(store.load().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_clear_truncates() {
        let dir = tempdir().unwrap();
        let store = FileHistoryStore::new(dir.path().join("history.txt"));

        store.persist(&["one".to_string()]).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let store = FileHistoryStore::new(dir.path().join("nested/dir/history.txt"));
        store.persist(&["query".to_string()]).await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec!["query".to_string()]);
    }
}
