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
pub struct RandomQuery {
    count: Option<usize>,
}

/// A random pick enriched with display metadata
#[derive(Debug, Serialize)]
pub struct RandomMovie {
    pub id: u64,
    pub title: String,
    #[serde(flatten)]
    pub details: MovieDetails,
}

/// Handler for the random movies endpoint
pub async fn random_movies(
    State(state): State<AppState>,
    Query(params): Query<RandomQuery>,
) -> AppResult<Json<Vec<RandomMovie>>> {
    let count = params.count.unwrap_or(recommender::DEFAULT_K);

    // Sample before the first await: the thread-local generator is not Send
    let indices = recommender::random_sample(&state.catalog, count, &mut rand::thread_rng())?;

    let ids: Vec<u64> = indices.iter().map(|&i| state.catalog.entry(i).id).collect();
    let metadata = metadata::lookup_batch(Arc::clone(&state.provider), &ids).await;

    let movies = indices
        .into_iter()
        .zip(metadata)
        .map(|(index, metadata)| {
            let entry = state.catalog.entry(index);
            RandomMovie {
                id: entry.id,
                title: entry.title.clone(),
                details: metadata.into_details(),
            }
        })
        .collect();

    Ok(Json(movies))
}
