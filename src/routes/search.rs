use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    models::ActorMatch,
    services::{metadata, recommender},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

/// Title and actor results stay in separate panels and are never merged
/// or deduplicated against each other.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub titles: Vec<String>,
    pub actor_matches: Vec<ActorMatch>,
}

/// Handler for the movie and actor search endpoint
///
/// An empty query matches every catalog title and skips the actor lookup.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let titles = recommender::search_titles(&state.catalog, &params.q)
        .map(str::to_string)
        .collect();

    let actor_matches = if params.q.trim().is_empty() {
        Vec::new()
    } else {
        metadata::search_by_actor(Arc::clone(&state.provider), &params.q).await
    };

    Json(SearchResponse {
        titles,
        actor_matches,
    })
}
