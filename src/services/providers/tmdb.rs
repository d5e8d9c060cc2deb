/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Details: /movie/{id} → poster path, overview, rating, release date, genres
/// 2. Actor search: /search/person → people with their `known_for` credits
///
/// Poster paths are relative; they are joined onto the image CDN base URL
/// during conversion in `models`.
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{ActorMatch, MovieDetails, TmdbMovie, TmdbPersonPage},
    services::providers::MetadataProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a TMDB provider with a bounded per-request timeout
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    /// Flatten a person-search page into the credits of every matched person
    fn collect_actor_matches(page: TmdbPersonPage) -> Vec<ActorMatch> {
        page.results
            .into_iter()
            .flat_map(|person| person.known_for)
            .filter_map(|credit| credit.into_match())
            .collect()
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let movie: TmdbMovie = response.json().await?;
        let details = MovieDetails::from(movie);

        tracing::debug!(
            movie_id = movie_id,
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details)
    }

    async fn search_by_actor(&self, query: &str) -> AppResult<Vec<ActorMatch>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Actor search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/person", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let page: TmdbPersonPage = response.json().await?;
        let matches = Self::collect_actor_matches(page);

        tracing::info!(
            query = %query,
            results = matches.len(),
            provider = "tmdb",
            "Actor search completed"
        );

        Ok(matches)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
