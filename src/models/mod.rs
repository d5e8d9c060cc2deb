use serde::{Deserialize, Serialize, Serializer};

/// Base URL for TMDB poster images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Poster shown when a movie has no poster on record
pub const MISSING_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Poster shown when the metadata fetch itself failed
pub const ERROR_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=Error";

/// One movie in the catalog
///
/// `id` is the TMDB identifier and is unique; titles are not guaranteed
/// unique, so title lookups resolve to the first match in catalog order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: u64,
    pub title: String,
}

/// Audience rating for a movie, or "N/A" when the provider had none
#[derive(Debug, Clone, PartialEq)]
pub enum Rating {
    Score(f64),
    Unavailable,
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(value) => serializer.serialize_f64(*value),
            Rating::Unavailable => serializer.serialize_str("N/A"),
        }
    }
}

/// Display metadata for a single movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieDetails {
    pub poster: String,
    pub overview: String,
    pub rating: Rating,
    pub release_date: String,
    pub genres: String,
}

impl MovieDetails {
    /// The well-defined fallback record returned when a metadata fetch fails
    pub fn placeholder() -> Self {
        Self {
            poster: ERROR_POSTER_URL.to_string(),
            overview: "No overview available.".to_string(),
            rating: Rating::Unavailable,
            release_date: "Unknown".to_string(),
            genres: "Unknown".to_string(),
        }
    }
}

/// Outcome of a metadata lookup
///
/// Fetch failures never surface as errors; they come back as `Degraded`
/// carrying the placeholder record, so callers treat both variants as
/// valid display data.
#[derive(Debug, Clone, PartialEq)]
pub enum Metadata {
    Fresh(MovieDetails),
    Degraded(MovieDetails),
}

impl Metadata {
    pub fn details(&self) -> &MovieDetails {
        match self {
            Metadata::Fresh(details) | Metadata::Degraded(details) => details,
        }
    }

    pub fn into_details(self) -> MovieDetails {
        match self {
            Metadata::Fresh(details) | Metadata::Degraded(details) => details,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Metadata::Degraded(_))
    }
}

/// A movie surfaced by actor-name search
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ActorMatch {
    pub title: String,
    pub poster: String,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// TMDB movie details response
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}

impl From<TmdbMovie> for MovieDetails {
    fn from(movie: TmdbMovie) -> Self {
        let poster = match movie.poster_path {
            Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
            None => MISSING_POSTER_URL.to_string(),
        };

        let rating = match movie.vote_average {
            Some(score) => Rating::Score(score),
            None => Rating::Unavailable,
        };

        // TMDB reports unreleased titles with an empty date string
        let release_date = match movie.release_date {
            Some(date) if !date.is_empty() => date,
            _ => "Unknown".to_string(),
        };

        let genres = if movie.genres.is_empty() {
            "Unknown".to_string()
        } else {
            movie
                .genres
                .into_iter()
                .map(|g| g.name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        MovieDetails {
            poster,
            overview: movie
                .overview
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| "No overview available.".to_string()),
            rating,
            release_date,
            genres,
        }
    }
}

/// TMDB person search response page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPersonPage {
    #[serde(default)]
    pub results: Vec<TmdbPerson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPerson {
    #[serde(default)]
    pub known_for: Vec<TmdbKnownFor>,
}

/// A credit in a person's `known_for` list; movies carry `title`,
/// TV entries carry `name`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKnownFor {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbKnownFor {
    /// Convert a credit into an actor match, if it has a usable title
    pub fn into_match(self) -> Option<ActorMatch> {
        let title = self.title.or(self.name)?;
        let poster = match self.poster_path {
            Some(path) => format!("{}{}", IMAGE_BASE_URL, path),
            None => MISSING_POSTER_URL.to_string(),
        };
        Some(ActorMatch { title, poster })
    }
}
