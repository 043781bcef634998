use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ns_core::{Error, Result, ResultSet};
use ns_session::SearchSessionStore;

/// Points awarded for a correct quiz answer.
pub const QUIZ_REWARD: u32 = 10;

/// Derived views the UI layer can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewKind {
    SentimentChart,
    SourceChart,
    WordCloud,
    Topics,
    Translation,
    Bookmarks,
}

/// Decides which derived views are valid for the current session state and
/// manages bookmark snapshots, filters, and quiz scoring over it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewCoordinator;

impl ViewCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Views that are currently worth (re)computing: the article-derived
    /// views need a non-empty result set, the bookmarks panel a non-empty
    /// collection.
    pub fn available_views(&self, session: &SearchSessionStore) -> Vec<ViewKind> {
        let mut views = Vec::new();
        if session.results().map(|r| !r.is_empty()).unwrap_or(false) {
            views.extend([
                ViewKind::SentimentChart,
                ViewKind::SourceChart,
                ViewKind::WordCloud,
                ViewKind::Topics,
                ViewKind::Translation,
            ]);
        }
        if !session.bookmarks().is_empty() {
            views.push(ViewKind::Bookmarks);
        }
        views
    }

    /// Store a deep snapshot of the result set under the given name,
    /// overwriting any prior bookmark of the same name. An empty name is a
    /// validation error and mutates nothing.
    pub fn add_bookmark(
        &self,
        session: &mut SearchSessionStore,
        name: &str,
        results: &ResultSet,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::Validation("bookmark name must not be empty".into()));
        }
        session.insert_bookmark(name.to_string(), results.clone());
        Ok(())
    }

    /// The stored snapshot; later searches never alter it.
    pub fn select_bookmark(
        &self,
        session: &SearchSessionStore,
        name: &str,
    ) -> Result<ResultSet> {
        session
            .bookmark(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no bookmark named {:?}", name)))
    }

    /// Articles from the named source, original relative order preserved.
    /// Filtering by "Unknown" selects the articles with no source field.
    pub fn filter_by_source(&self, results: &ResultSet, source: &str) -> ResultSet {
        ResultSet::new(
            results.query.clone(),
            results
                .articles
                .iter()
                .filter(|l| l.article.source_name() == source)
                .cloned()
                .collect(),
        )
    }

    /// Articles published within [start, end], bounds inclusive. Articles
    /// without a parsed timestamp are excluded, not defaulted into range.
    pub fn filter_by_date_range(
        &self,
        results: &ResultSet,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ResultSet {
        ResultSet::new(
            results.query.clone(),
            results
                .articles
                .iter()
                .filter(|l| match l.article.published_at {
                    Some(at) => at >= start && at <= end,
                    None => false,
                })
                .cloned()
                .collect(),
        )
    }

    /// Case-insensitive exact-match quiz check. A correct answer awards
    /// [`QUIZ_REWARD`] at most once per article per session; a repeated
    /// correct answer still reports true but awards nothing further.
    pub fn record_quiz_answer(
        &self,
        session: &mut SearchSessionStore,
        article_index: usize,
        given: &str,
        expected: &str,
    ) -> bool {
        let correct = given.to_lowercase() == expected.to_lowercase();
        if correct {
            let query = session
                .results()
                .map(|r| r.query.clone())
                .unwrap_or_default();
            if session.mark_answered(&query, article_index) {
                session.award(QUIZ_REWARD);
            }
        }
        correct
    }

    /// Serialize the bookmark collection to JSON.
    pub fn bookmarks_to_json(&self, session: &SearchSessionStore) -> Result<String> {
        Ok(serde_json::to_string(session.bookmarks())?)
    }

    /// Replace the bookmark collection from JSON produced by
    /// [`Self::bookmarks_to_json`].
    pub fn bookmarks_from_json(
        &self,
        session: &mut SearchSessionStore,
        json: &str,
    ) -> Result<()> {
        let bookmarks: HashMap<String, ResultSet> = serde_json::from_str(json)?;
        session.replace_bookmarks(bookmarks);
        Ok(())
    }
}
