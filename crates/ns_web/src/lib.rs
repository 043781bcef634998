use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/search", post(handlers::search))
        .route("/api/history", get(handlers::get_history))
        .route("/api/history", delete(handlers::clear_history))
        .route("/api/results", get(handlers::get_results))
        .route("/api/results/counts", get(handlers::get_counts))
        .route("/api/results/sources", get(handlers::get_sources))
        .route("/api/results/table", get(handlers::get_table))
        .route("/api/results/terms", get(handlers::get_terms))
        .route("/api/results/topics", get(handlers::get_topics))
        .route("/api/bookmarks", get(handlers::list_bookmarks))
        .route("/api/bookmarks", post(handlers::add_bookmark))
        .route("/api/bookmarks/:name", get(handlers::get_bookmark))
        .route("/api/quiz", post(handlers::answer_quiz))
        .route("/api/score", get(handlers::get_score))
        .route("/api/views", get(handlers::get_views))
        .route("/api/translate", post(handlers::translate_article))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::AppState;
    pub use ns_core::{Error, Result};
}
