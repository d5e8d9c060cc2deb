/// Movie metadata provider abstraction
///
/// Display metadata (posters, overviews, ratings) comes from an external
/// movie database. The trait keeps the HTTP details behind a seam so routes
/// and tests can swap in stubs; the production implementation is TMDB.
use crate::{
    error::AppResult,
    models::{ActorMatch, MovieDetails},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Both operations return plain errors here; the degrade-to-placeholder
/// policy lives one layer up in `services::metadata`, so implementations
/// stay honest about failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display metadata for a movie by its provider id
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Find movies credited to actors matching the query
    ///
    /// Returns (title, poster) pairs in the provider's relevance order.
    async fn search_by_actor(&self, query: &str) -> AppResult<Vec<ActorMatch>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
