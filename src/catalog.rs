use std::fs;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::CatalogEntry;

/// Square matrix of pairwise similarity scores, row-major
///
/// Validated on construction: square, symmetric, every score finite.
/// Immutable after load, so concurrent readers need no synchronization.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f32>,
}

// Offline pipelines emit bit-identical mirrored scores, but leave a little
// slack for ones that recompute each triangle separately.
const SYMMETRY_TOLERANCE: f32 = 1e-6;

impl SimilarityMatrix {
    /// Build a matrix from row-major scores, checking the structural invariants
    pub fn from_scores(dim: usize, scores: Vec<f32>) -> AppResult<Self> {
        if scores.len() != dim * dim {
            return Err(AppError::Catalog(format!(
                "similarity matrix has {} scores, expected {} for dimension {}",
                scores.len(),
                dim * dim,
                dim
            )));
        }

        if let Some(position) = scores.iter().position(|s| !s.is_finite()) {
            return Err(AppError::Catalog(format!(
                "similarity matrix contains a non-finite score at offset {}",
                position
            )));
        }

        let matrix = Self { dim, scores };

        for i in 0..dim {
            for j in (i + 1)..dim {
                let forward = matrix.score(i, j);
                let backward = matrix.score(j, i);
                if (forward - backward).abs() > SYMMETRY_TOLERANCE {
                    return Err(AppError::Catalog(format!(
                        "similarity matrix is not symmetric at ({}, {}): {} vs {}",
                        i, j, forward, backward
                    )));
                }
            }
        }

        Ok(matrix)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn score(&self, i: usize, j: usize) -> f32 {
        self.scores[i * self.dim + j]
    }

    /// All scores for one entry, indexed by the other entry
    pub fn row(&self, i: usize) -> &[f32] {
        &self.scores[i * self.dim..(i + 1) * self.dim]
    }
}

/// The universe of known movies plus their pairwise similarity scores
///
/// Loaded once at startup and handed to the recommender as an immutable
/// handle; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    matrix: SimilarityMatrix,
}

impl Catalog {
    /// Pair an entry list with its similarity matrix, checking index alignment
    pub fn new(entries: Vec<CatalogEntry>, matrix: SimilarityMatrix) -> AppResult<Self> {
        if matrix.dim() != entries.len() {
            return Err(AppError::Catalog(format!(
                "similarity matrix dimension {} does not match catalog length {}",
                matrix.dim(),
                entries.len()
            )));
        }

        Ok(Self { entries, matrix })
    }

    /// Load the catalog from a JSON entry list and a raw f32 matrix file
    ///
    /// The matrix file is little-endian row-major f32 with exactly N*N
    /// scores for a catalog of N entries.
    pub fn load(catalog_path: &Path, matrix_path: &Path) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_slice(&fs::read(catalog_path)?)?;

        let bytes = fs::read(matrix_path)?;
        if bytes.len() % std::mem::size_of::<f32>() != 0 {
            return Err(AppError::Catalog(format!(
                "similarity matrix file is {} bytes, not a whole number of f32 scores",
                bytes.len()
            )));
        }
        let scores: Vec<f32> = bytemuck::pod_collect_to_vec(&bytes[..]);

        let matrix = SimilarityMatrix::from_scores(entries.len(), scores)?;

        tracing::info!(
            entries = entries.len(),
            catalog_path = %catalog_path.display(),
            matrix_path = %matrix_path.display(),
            "Catalog loaded"
        );

        Self::new(entries, matrix)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> &CatalogEntry {
        &self.entries[index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry whose title matches exactly, by catalog order
    ///
    /// Duplicate titles exist in real exports; the first one wins, matching
    /// how positional lookup behaved in the source data.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.title == title)
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.matrix
    }
}
