use rand::Rng;

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;

/// Default number of recommendations returned
pub const DEFAULT_K: usize = 5;

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f32,
}

/// Rank catalog entries by similarity to the entry with the given title
///
/// Title matching is exact and case-sensitive; the first catalog entry with
/// that title is the query. The query itself is excluded from the output.
/// Entries are sorted by descending score with ties keeping catalog order,
/// and `k` is clamped to the number of other entries. Pure function of
/// (catalog, title, k).
pub fn recommend<'a>(catalog: &'a Catalog, title: &str, k: usize) -> AppResult<Vec<Ranked<'a>>> {
    if k == 0 {
        return Err(AppError::InvalidInput(
            "k must be at least 1".to_string(),
        ));
    }

    let query_index = catalog
        .index_of_title(title)
        .ok_or_else(|| AppError::NotFound(format!("title not in catalog: {}", title)))?;

    let row = catalog.similarity().row(query_index);

    let mut ranked: Vec<(usize, f32)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|&(index, _)| index != query_index)
        .collect();

    // Stable sort: equal scores keep catalog order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);

    Ok(ranked
        .into_iter()
        .map(|(index, score)| Ranked {
            entry: catalog.entry(index),
            score,
        })
        .collect())
}

/// Pick `n` distinct catalog indices uniformly at random
///
/// The random source is injected so callers can seed it for reproducible
/// tests; routes pass a thread-local generator.
pub fn random_sample<R: Rng + ?Sized>(
    catalog: &Catalog,
    n: usize,
    rng: &mut R,
) -> AppResult<Vec<usize>> {
    if n > catalog.len() {
        return Err(AppError::InvalidInput(format!(
            "cannot sample {} movies from a catalog of {}",
            n,
            catalog.len()
        )));
    }

    Ok(rand::seq::index::sample(rng, catalog.len(), n).into_vec())
}

/// Titles containing the query, case-insensitively, in catalog order
///
/// Stateless and restartable; an empty query matches every title.
pub fn search_titles<'a>(
    catalog: &'a Catalog,
    query: &str,
) -> impl Iterator<Item = &'a str> + 'a {
    let needle = query.to_lowercase();
    catalog
        .entries()
        .iter()
        .filter(move |entry| entry.title.to_lowercase().contains(&needle))
        .map(|entry| entry.title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SimilarityMatrix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn entry(id: u64, title: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
        }
    }

    fn fixture_catalog() -> Catalog {
        let entries = vec![
            entry(1, "Alpha"),
            entry(2, "Beta"),
            entry(3, "Gamma"),
            entry(4, "Delta"),
        ];
        #[rustfmt::skip]
        let scores = vec![
            1.0, 0.9, 0.2, 0.5,
            0.9, 1.0, 0.4, 0.3,
            0.2, 0.4, 1.0, 0.8,
            0.5, 0.3, 0.8, 1.0,
        ];
        let matrix = SimilarityMatrix::from_scores(4, scores).unwrap();
        Catalog::new(entries, matrix).unwrap()
    }

    fn titles(ranked: &[Ranked<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.entry.title.clone()).collect()
    }

    #[test]
    fn test_recommend_ranks_by_descending_score() {
        let catalog = fixture_catalog();

        let ranked = recommend(&catalog, "Alpha", 2).unwrap();
        assert_eq!(titles(&ranked), vec!["Beta", "Delta"]);

        let ranked = recommend(&catalog, "Alpha", 3).unwrap();
        assert_eq!(titles(&ranked), vec!["Beta", "Delta", "Gamma"]);
        assert_eq!(ranked[0].score, 0.9);
        assert_eq!(ranked[2].score, 0.2);
    }

    #[test]
    fn test_recommend_excludes_the_query_entry() {
        let catalog = fixture_catalog();
        let ranked = recommend(&catalog, "Gamma", 3).unwrap();

        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|r| r.entry.title != "Gamma"));
    }

    #[test]
    fn test_recommend_clamps_oversized_k() {
        let catalog = fixture_catalog();
        let ranked = recommend(&catalog, "Alpha", 100).unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_recommend_rejects_zero_k() {
        let catalog = fixture_catalog();
        let result = recommend(&catalog, "Alpha", 0);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_recommend_unknown_title_is_not_found() {
        let catalog = fixture_catalog();
        let result = recommend(&catalog, "Zeta", 2);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_recommend_is_case_sensitive() {
        let catalog = fixture_catalog();
        let result = recommend(&catalog, "alpha", 2);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let catalog = fixture_catalog();
        let first = titles(&recommend(&catalog, "Beta", 3).unwrap());
        let second = titles(&recommend(&catalog, "Beta", 3).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_ties_keep_catalog_order() {
        let entries = vec![
            entry(1, "Alpha"),
            entry(2, "Beta"),
            entry(3, "Gamma"),
            entry(4, "Delta"),
        ];
        #[rustfmt::skip]
        let scores = vec![
            1.0, 0.5, 0.5, 0.5,
            0.5, 1.0, 0.0, 0.0,
            0.5, 0.0, 1.0, 0.0,
            0.5, 0.0, 0.0, 1.0,
        ];
        let matrix = SimilarityMatrix::from_scores(4, scores).unwrap();
        let catalog = Catalog::new(entries, matrix).unwrap();

        let ranked = recommend(&catalog, "Alpha", 3).unwrap();
        assert_eq!(titles(&ranked), vec!["Beta", "Gamma", "Delta"]);
    }

    #[test]
    fn test_random_sample_returns_distinct_in_range_indices() {
        let catalog = fixture_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let sample = random_sample(&catalog, 3, &mut rng).unwrap();
            assert_eq!(sample.len(), 3);
            assert!(sample.iter().all(|&i| i < catalog.len()));

            let distinct: HashSet<usize> = sample.iter().copied().collect();
            assert_eq!(distinct.len(), 3);
        }
    }

    #[test]
    fn test_random_sample_full_catalog_is_a_permutation() {
        let catalog = fixture_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let sample = random_sample(&catalog, 4, &mut rng).unwrap();
        let distinct: HashSet<usize> = sample.into_iter().collect();
        assert_eq!(distinct, (0..4).collect());
    }

    #[test]
    fn test_random_sample_rejects_oversized_n() {
        let catalog = fixture_catalog();
        let mut rng = StdRng::seed_from_u64(7);

        let result = random_sample(&catalog, 5, &mut rng);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_search_titles_case_insensitive_substring() {
        let catalog = fixture_catalog();

        let found: Vec<&str> = search_titles(&catalog, "aM").collect();
        assert_eq!(found, vec!["Gamma"]);

        let found: Vec<&str> = search_titles(&catalog, "A").collect();
        assert_eq!(found, vec!["Alpha", "Beta", "Gamma", "Delta"]);
    }

    #[test]
    fn test_search_titles_empty_query_returns_full_catalog() {
        let catalog = fixture_catalog();
        let found: Vec<&str> = search_titles(&catalog, "").collect();
        assert_eq!(found, vec!["Alpha", "Beta", "Gamma", "Delta"]);
    }

    #[test]
    fn test_search_titles_no_match_is_empty() {
        let catalog = fixture_catalog();
        assert_eq!(search_titles(&catalog, "zeta").count(), 0);
    }
}
