use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use ns_analysis::{ResultAggregator, TopicCache, TopicModeler};
use ns_core::Translator;
use ns_session::{FileHistoryStore, MemoryHistoryStore, SearchSessionStore};
use ns_views::ViewCoordinator;
use tokio::sync::RwLock;

/// One user's isolated state: the session store plus its derived caches.
pub struct SessionEntry {
    pub store: SearchSessionStore,
    pub topics: TopicCache,
}

/// Shared application state. Collaborators are process-wide and stateless;
/// all mutable session state lives in the registry, one entry per session
/// id, so concurrent sessions never share it.
pub struct AppState {
    pub aggregator: Arc<ResultAggregator>,
    pub coordinator: ViewCoordinator,
    pub translator: Arc<dyn Translator>,
    pub modeler: TopicModeler,
    history_dir: Option<PathBuf>,
    sessions: RwLock<HashMap<String, Arc<RwLock<SessionEntry>>>>,
}

impl AppState {
    /// With a history directory, each session persists its queries to its
    /// own file under it; without one, history lives in memory only.
    pub fn new(
        aggregator: Arc<ResultAggregator>,
        translator: Arc<dyn Translator>,
        history_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            aggregator,
            coordinator: ViewCoordinator::new(),
            translator,
            modeler: TopicModeler::default(),
            history_dir,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The entry for a session id, created on first use.
    pub async fn session(&self, id: &str) -> Arc<RwLock<SessionEntry>> {
        if let Some(entry) = self.sessions.read().await.get(id) {
            return entry.clone();
        }

        let mut sessions = self.sessions.write().await;
        // re-check under the write lock; another request may have created it
        if let Some(entry) = sessions.get(id) {
            return entry.clone();
        }

        let store = match &self.history_dir {
            Some(dir) => {
                let backend = Arc::new(FileHistoryStore::new(
                    dir.join(format!("history-{}.txt", id)),
                ));
                match SearchSessionStore::open(backend.clone()).await {
                    Ok(store) => store,
                    Err(e) => {
                        tracing::warn!("failed to load history for session {}: {}", id, e);
                        SearchSessionStore::new(backend)
                    }
                }
            }
            None => SearchSessionStore::new(Arc::new(MemoryHistoryStore::new())),
        };
        let entry = Arc::new(RwLock::new(SessionEntry {
            store,
            topics: TopicCache::new(),
        }));
        sessions.insert(id.to_string(), entry.clone());
        entry
    }
}
