use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ns_core::{Error, ResultSet, Result};
use tracing::warn;

use crate::history::{HistoryStore, HISTORY_WINDOW, MAX_PERSISTED_ENTRIES};

/// All mutable state for one user session: search history, the current
/// result set, bookmarks, and the quiz score. Constructed at session start,
/// discarded at session end; never shared across sessions.
pub struct SearchSessionStore {
    store: Arc<dyn HistoryStore>,
    history: Vec<String>,
    results: Option<ResultSet>,
    bookmarks: HashMap<String, ResultSet>,
    score: u32,
    answered: HashSet<(String, usize)>,
}

impl SearchSessionStore {
    /// Fresh session over the given history backend, with no seeded history.
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self {
            store,
            history: Vec::new(),
            results: None,
            bookmarks: HashMap::new(),
            score: 0,
            answered: HashSet::new(),
        }
    }

    /// Session seeded from persisted history, so persisting after the next
    /// query keeps entries recorded by earlier sessions.
    pub async fn open(store: Arc<dyn HistoryStore>) -> Result<Self> {
        let history = store.load().await?;
        let mut session = Self::new(store);
        session.history = history;
        Ok(session)
    }

    /// Read persisted history, surfacing at most the last [`HISTORY_WINDOW`]
    /// entries in original chronological order. Missing storage loads as
    /// empty.
    pub async fn load_history(&self) -> Result<Vec<String>> {
        let entries = self.store.load().await?;
        let skip = entries.len().saturating_sub(HISTORY_WINDOW);
        Ok(entries[skip..].to_vec())
    }

    /// Append the query to the in-memory history and rewrite durable storage
    /// with the whole history (capped to the most recent
    /// [`MAX_PERSISTED_ENTRIES`]). A write failure is logged and swallowed:
    /// the in-memory history stays authoritative for the session.
    pub async fn record_query(&mut self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(Error::Validation("search query must not be empty".into()));
        }

        self.history.push(query.to_string());

        let skip = self.history.len().saturating_sub(MAX_PERSISTED_ENTRIES);
        if let Err(e) = self.store.persist(&self.history[skip..]).await {
            warn!("failed to persist search history: {}", e);
        }
        Ok(())
    }

    /// Truncate persisted storage and clear the in-memory history. A write
    /// failure is logged; the in-memory history clears regardless.
    pub async fn clear_history(&mut self) {
        if let Err(e) = self.store.clear().await {
            warn!("failed to clear persisted search history: {}", e);
        }
        self.history.clear();
    }

    /// The in-memory history window, most recent last.
    pub fn recent_queries(&self) -> &[String] {
        let skip = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[skip..]
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    /// Replace the current result set wholesale.
    pub fn set_results(&mut self, results: ResultSet) {
        self.results = Some(results);
    }

    pub fn bookmarks(&self) -> &HashMap<String, ResultSet> {
        &self.bookmarks
    }

    pub fn bookmark(&self, name: &str) -> Option<&ResultSet> {
        self.bookmarks.get(name)
    }

    pub fn bookmark_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.bookmarks.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn insert_bookmark(&mut self, name: String, snapshot: ResultSet) {
        self.bookmarks.insert(name, snapshot);
    }

    pub fn replace_bookmarks(&mut self, bookmarks: HashMap<String, ResultSet>) {
        self.bookmarks = bookmarks;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// Record that the quiz for an article was answered correctly. Returns
    /// false if it was already marked within this session.
    pub fn mark_answered(&mut self, query: &str, article_index: usize) -> bool {
        self.answered.insert((query.to_string(), article_index))
    }
}
