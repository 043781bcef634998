use async_trait::async_trait;
use ns_core::Result;
use tokio::sync::RwLock;

use crate::history::HistoryStore;

/// In-memory history backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: RwLock<Vec<String>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn load(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().await.clone())
    }

    async fn persist(&self, entries: &[String]) -> Result<()> {
        *self.entries.write().await = entries.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryHistoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        store.persist(&["rust".to_string()]).await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec!["rust".to_string()]);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
