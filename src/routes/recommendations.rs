use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppResult,
    models::MovieDetails,
    services::{metadata, recommender},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    title: String,
    k: Option<usize>,
}

/// One recommendation enriched with display metadata
#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub id: u64,
    pub title: String,
    pub score: f32,
    #[serde(flatten)]
    pub details: MovieDetails,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub query: String,
    pub results: Vec<RecommendedMovie>,
}

/// Handler for the recommendations endpoint
///
/// Ranking happens synchronously over the in-memory catalog; metadata for
/// the ranked ids is fetched in parallel afterwards and can only degrade,
/// never fail the request.
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationsResponse>> {
    let k = params.k.unwrap_or(recommender::DEFAULT_K);
    let ranked = recommender::recommend(&state.catalog, &params.title, k)?;

    let ids: Vec<u64> = ranked.iter().map(|r| r.entry.id).collect();
    let metadata = metadata::lookup_batch(Arc::clone(&state.provider), &ids).await;

    let results = ranked
        .into_iter()
        .zip(metadata)
        .map(|(ranked, metadata)| RecommendedMovie {
            id: ranked.entry.id,
            title: ranked.entry.title.clone(),
            score: ranked.score,
            details: metadata.into_details(),
        })
        .collect();

    Ok(Json(RecommendationsResponse {
        query: params.title,
        results,
    }))
}
