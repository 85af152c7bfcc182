//! Video search endpoint
//!
//! `GET /api/youtube/search?q=...` proxies a keyed YouTube search.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    routes::metrics::record_search,
    search::VideoResult,
    AppState,
};

/// Query string of a search request
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<VideoResult>,
}

/// Handle video search requests
pub async fn youtube_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResults>> {
    let query = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("q query required".to_string()))?;

    match state.youtube.search(&query).await {
        Ok(results) => {
            record_search("success");
            Ok(Json(SearchResults { results }))
        }
        Err(e) => {
            record_search("error");
            Err(e)
        }
    }
}
