use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use ns_analysis::{word_frequencies, Topic};
use ns_core::{Error, ResultSet, SentimentCounts, TableRow};
use ns_views::ViewKind;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::AppState;

const SESSION_HEADER: &str = "x-session-id";
const DEFAULT_SESSION: &str = "default";
const TERM_LIMIT: usize = 50;

#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

fn session_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_SESSION)
        .to_string()
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub keyword: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub notice: String,
    pub counts: SentimentCounts,
    pub results: ResultSet,
}

/// Record the query, fetch and label articles, replace the session's result
/// set. Upstream failures come back as a notice in a success body, not an
/// HTTP error.
pub async fn search(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let entry = state.session(&session_id(&headers)).await;
    let mut guard = entry.write().await;

    guard.store.record_query(&request.keyword).await?;
    let outcome = state.aggregator.fetch_and_label(&request.keyword).await;
    let counts = state.aggregator.aggregate_counts(&outcome.results);
    guard.store.set_results(outcome.results.clone());

    Ok(Json(SearchResponse {
        notice: outcome.notice,
        counts,
        results: outcome.results,
    }))
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, ApiError> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Ok(Json(guard.store.load_history().await?))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> StatusCode {
    let entry = state.session(&session_id(&headers)).await;
    entry.write().await.store.clear_history().await;
    StatusCode::NO_CONTENT
}

pub async fn get_results(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Option<ResultSet>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Json(guard.store.results().cloned())
}

pub async fn get_counts(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SentimentCounts> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    let results = guard.store.results().cloned().unwrap_or_default();
    Json(state.aggregator.aggregate_counts(&results))
}

pub async fn get_sources(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<BTreeMap<String, usize>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    let results = guard.store.results().cloned().unwrap_or_default();
    Json(state.aggregator.group_by_source(&results))
}

pub async fn get_table(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<TableRow>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    let results = guard.store.results().cloned().unwrap_or_default();
    Json(state.aggregator.to_table(&results))
}

pub async fn get_terms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<(String, usize)>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    let results = guard.store.results().cloned().unwrap_or_default();
    Json(word_frequencies(&results, TERM_LIMIT))
}

#[derive(Serialize)]
pub struct TopicsResponse {
    pub topics: Option<Vec<Topic>>,
    pub notice: Option<String>,
}

pub async fn get_topics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<TopicsResponse> {
    let entry = state.session(&session_id(&headers)).await;
    let mut guard = entry.write().await;
    let results = guard.store.results().cloned().unwrap_or_default();
    let topics = guard.topics.topics_for(&results, &state.modeler);
    let notice = topics
        .is_none()
        .then(|| "Not enough article text to fit topics".to_string());
    Json(TopicsResponse { topics, notice })
}

#[derive(Deserialize)]
pub struct BookmarkRequest {
    pub name: String,
}

pub async fn list_bookmarks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<String>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Json(guard.store.bookmark_names())
}

/// Snapshot the current result set under the given name.
pub async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<BookmarkRequest>,
) -> Result<StatusCode, ApiError> {
    let entry = state.session(&session_id(&headers)).await;
    let mut guard = entry.write().await;

    let results = guard
        .store
        .results()
        .cloned()
        .ok_or_else(|| Error::Validation("no search results to bookmark".into()))?;
    state
        .coordinator
        .add_bookmark(&mut guard.store, &request.name, &results)?;
    Ok(StatusCode::CREATED)
}

pub async fn get_bookmark(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(name): Path<String>,
) -> Result<Json<ResultSet>, ApiError> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Ok(Json(state.coordinator.select_bookmark(&guard.store, &name)?))
}

#[derive(Deserialize)]
pub struct QuizRequest {
    pub article_index: usize,
    pub answer: String,
    pub expected: String,
}

#[derive(Serialize)]
pub struct QuizResponse {
    pub correct: bool,
    pub score: u32,
}

pub async fn answer_quiz(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<QuizRequest>,
) -> Json<QuizResponse> {
    let entry = state.session(&session_id(&headers)).await;
    let mut guard = entry.write().await;

    let correct = state.coordinator.record_quiz_answer(
        &mut guard.store,
        request.article_index,
        &request.answer,
        &request.expected,
    );
    Json(QuizResponse {
        correct,
        score: guard.store.score(),
    })
}

#[derive(Serialize)]
pub struct ScoreResponse {
    pub score: u32,
}

pub async fn get_score(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ScoreResponse> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Json(ScoreResponse {
        score: guard.store.score(),
    })
}

pub async fn get_views(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<Vec<ViewKind>> {
    let entry = state.session(&session_id(&headers)).await;
    let guard = entry.read().await;
    Json(state.coordinator.available_views(&guard.store))
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    pub article_index: usize,
    pub target: String,
}

#[derive(Serialize)]
pub struct TranslateResponse {
    pub translated: Option<String>,
    pub notice: Option<String>,
}

/// Translate one article's content on demand. A collaborator failure
/// surfaces as a notice, never a retry.
pub async fn translate_article(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let entry = state.session(&session_id(&headers)).await;
    let content = {
        let guard = entry.read().await;
        guard
            .store
            .results()
            .and_then(|r| r.articles.get(request.article_index))
            .map(|l| l.article.content_text().to_string())
            .ok_or_else(|| {
                Error::NotFound(format!("no article at index {}", request.article_index))
            })?
    };

    match state.translator.translate(&content, &request.target).await {
        Ok(translated) => Ok(Json(TranslateResponse {
            translated: Some(translated),
            notice: None,
        })),
        Err(e) => {
            warn!("translation failed: {}", e);
            Ok(Json(TranslateResponse {
                translated: None,
                notice: Some(format!("Translation failed: {}", e)),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_analysis::{LexiconScorer, ResultAggregator};
    use ns_search::{DummyProvider, EchoTranslator};

    fn app_state() -> AppState {
        let aggregator = Arc::new(ResultAggregator::new(
            Arc::new(DummyProvider::sample()),
            Arc::new(LexiconScorer::new()),
        ));
        AppState::new(aggregator, Arc::new(EchoTranslator), None)
    }

    #[tokio::test]
    async fn test_search_then_read_accessors() {
        let state = Arc::new(app_state());
        let headers = HeaderMap::new();

        let response = search(
            State(state.clone()),
            headers.clone(),
            Json(SearchRequest {
                keyword: "markets".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.0.results.len(), 3);
        assert_eq!(response.0.counts.total(), 3);
        assert_eq!(response.0.notice, "Found 3 articles");

        let history = get_history(State(state.clone()), headers.clone())
            .await
            .unwrap();
        assert_eq!(history.0, vec!["markets".to_string()]);

        let counts = get_counts(State(state.clone()), headers.clone()).await;
        assert_eq!(counts.0.total(), 3);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let state = Arc::new(app_state());

        let mut headers_a = HeaderMap::new();
        headers_a.insert(SESSION_HEADER, "alice".parse().unwrap());
        let mut headers_b = HeaderMap::new();
        headers_b.insert(SESSION_HEADER, "bob".parse().unwrap());

        search(
            State(state.clone()),
            headers_a.clone(),
            Json(SearchRequest {
                keyword: "climate".to_string(),
            }),
        )
        .await
        .unwrap();

        let history_a = get_history(State(state.clone()), headers_a).await.unwrap();
        let history_b = get_history(State(state.clone()), headers_b).await.unwrap();
        assert_eq!(history_a.0.len(), 1);
        assert!(history_b.0.is_empty());
    }

    #[tokio::test]
    async fn test_empty_keyword_is_validation_error() {
        let state = Arc::new(app_state());
        let result = search(
            State(state),
            HeaderMap::new(),
            Json(SearchRequest {
                keyword: "   ".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(ApiError(Error::Validation(_)))));
    }

    #[tokio::test]
    async fn test_bookmark_flow() {
        let state = Arc::new(app_state());
        let headers = HeaderMap::new();

        // bookmarking before any search is a validation error
        let early = add_bookmark(
            State(state.clone()),
            headers.clone(),
            Json(BookmarkRequest {
                name: "saved".to_string(),
            }),
        )
        .await;
        assert!(matches!(early, Err(ApiError(Error::Validation(_)))));

        search(
            State(state.clone()),
            headers.clone(),
            Json(SearchRequest {
                keyword: "markets".to_string(),
            }),
        )
        .await
        .unwrap();

        let created = add_bookmark(
            State(state.clone()),
            headers.clone(),
            Json(BookmarkRequest {
                name: "saved".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created, StatusCode::CREATED);

        let bookmark = get_bookmark(
            State(state.clone()),
            headers.clone(),
            Path("saved".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(bookmark.0.len(), 3);

        let missing = get_bookmark(State(state), headers, Path("nope".to_string())).await;
        assert!(matches!(missing, Err(ApiError(Error::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_quiz_endpoint_scores_once() {
        let state = Arc::new(app_state());
        let headers = HeaderMap::new();

        search(
            State(state.clone()),
            headers.clone(),
            Json(SearchRequest {
                keyword: "markets".to_string(),
            }),
        )
        .await
        .unwrap();

        let first = answer_quiz(
            State(state.clone()),
            headers.clone(),
            Json(QuizRequest {
                article_index: 0,
                answer: "Yes".to_string(),
                expected: "yes".to_string(),
            }),
        )
        .await;
        assert!(first.0.correct);
        assert_eq!(first.0.score, 10);

        let repeat = answer_quiz(
            State(state.clone()),
            headers,
            Json(QuizRequest {
                article_index: 0,
                answer: "yes".to_string(),
                expected: "yes".to_string(),
            }),
        )
        .await;
        assert!(repeat.0.correct);
        assert_eq!(repeat.0.score, 10);
    }

    #[tokio::test]
    async fn test_translate_echoes_article_content() {
        let state = Arc::new(app_state());
        let headers = HeaderMap::new();

        search(
            State(state.clone()),
            headers.clone(),
            Json(SearchRequest {
                keyword: "markets".to_string(),
            }),
        )
        .await
        .unwrap();

        let response = translate_article(
            State(state.clone()),
            headers.clone(),
            Json(TranslateRequest {
                article_index: 0,
                target: "es".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(response.0.translated.is_some());

        let out_of_range = translate_article(
            State(state),
            headers,
            Json(TranslateRequest {
                article_index: 99,
                target: "es".to_string(),
            }),
        )
        .await;
        assert!(matches!(out_of_range, Err(ApiError(Error::NotFound(_)))));
    }
}
