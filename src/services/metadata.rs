use std::sync::Arc;

use crate::models::{ActorMatch, Metadata, MovieDetails};
use crate::services::providers::MetadataProvider;

/// Fetch metadata for one movie, degrading to a placeholder on failure
///
/// This is the degrade-never-fail boundary for display data: whatever goes
/// wrong underneath (network, non-2xx, decode), callers get a valid record.
/// Failures are logged so they stay observable.
pub async fn lookup(provider: Arc<dyn MetadataProvider>, movie_id: u64) -> Metadata {
    match provider.fetch_details(movie_id).await {
        Ok(details) => Metadata::Fresh(details),
        Err(e) => {
            tracing::warn!(
                movie_id = movie_id,
                provider = provider.name(),
                error = %e,
                "Metadata fetch failed, serving placeholder"
            );
            Metadata::Degraded(MovieDetails::placeholder())
        }
    }
}

/// Fetch metadata for several movies in parallel
///
/// Spawns one task per id and preserves input order in the output. Join
/// failures degrade like any other fetch failure.
pub async fn lookup_batch(provider: Arc<dyn MetadataProvider>, movie_ids: &[u64]) -> Vec<Metadata> {
    let mut tasks = Vec::with_capacity(movie_ids.len());

    for &movie_id in movie_ids {
        let provider = Arc::clone(&provider);
        tasks.push(tokio::spawn(async move { lookup(provider, movie_id).await }));
    }

    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(metadata) => results.push(metadata),
            Err(e) => {
                tracing::error!(error = %e, "Metadata task join error");
                results.push(Metadata::Degraded(MovieDetails::placeholder()));
            }
        }
    }

    let degraded = results.iter().filter(|m| m.is_degraded()).count();
    if degraded > 0 {
        tracing::warn!(
            degraded = degraded,
            total = results.len(),
            "Partial metadata degradation"
        );
    }

    results
}

/// Actor search with the same degrade policy: failures become an empty list
pub async fn search_by_actor(provider: Arc<dyn MetadataProvider>, query: &str) -> Vec<ActorMatch> {
    match provider.search_by_actor(query).await {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(
                query = %query,
                provider = provider.name(),
                error = %e,
                "Actor search failed, serving no matches"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{Rating, ERROR_POSTER_URL};
    use crate::services::providers::MockMetadataProvider;
    use mockall::predicate::eq;

    fn details_with_overview(overview: &str) -> MovieDetails {
        MovieDetails {
            poster: "http://posters.local/p.jpg".to_string(),
            overview: overview.to_string(),
            rating: Rating::Score(8.0),
            release_date: "2010-07-16".to_string(),
            genres: "Sci-Fi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_success_is_fresh() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .with(eq(27205))
            .returning(|_| Ok(details_with_overview("A thief enters dreams.")));

        let metadata = lookup(Arc::new(provider), 27205).await;

        assert!(!metadata.is_degraded());
        assert_eq!(metadata.details().overview, "A thief enters dreams.");
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_placeholder() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .returning(|_| Err(AppError::ExternalApi("boom".to_string())));
        provider.expect_name().return_const("mock");

        let metadata = lookup(Arc::new(provider), 27205).await;

        assert!(metadata.is_degraded());
        assert_eq!(metadata.details().poster, ERROR_POSTER_URL);
        assert_eq!(metadata.details().overview, "No overview available.");
        assert_eq!(metadata.details().rating, Rating::Unavailable);
        assert_eq!(metadata.details().release_date, "Unknown");
        assert_eq!(metadata.details().genres, "Unknown");
    }

    #[tokio::test]
    async fn test_lookup_batch_preserves_order_and_degrades_per_item() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_details().returning(|movie_id| {
            if movie_id == 2 {
                Err(AppError::ExternalApi("boom".to_string()))
            } else {
                Ok(details_with_overview(&format!("movie {}", movie_id)))
            }
        });
        provider.expect_name().return_const("mock");

        let results = lookup_batch(Arc::new(provider), &[1, 2, 3]).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].details().overview, "movie 1");
        assert!(results[1].is_degraded());
        assert_eq!(results[2].details().overview, "movie 3");
    }

    #[tokio::test]
    async fn test_actor_search_failure_is_empty() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_by_actor()
            .returning(|_| Err(AppError::ExternalApi("boom".to_string())));
        provider.expect_name().return_const("mock");

        let matches = search_by_actor(Arc::new(provider), "dicaprio").await;
        assert!(matches.is_empty());
    }
}
