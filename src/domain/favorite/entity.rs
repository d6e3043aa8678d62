// src/domain/favorite/entity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie as delivered by the remote metadata provider.
///
/// These fields are consumed as-is: the favorites subsystem never
/// validates or re-fetches them, it only snapshots them into a
/// [`FavoriteRecord`] when the user favorites the movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Upstream movie identifier
    pub id: u64,

    /// Display title
    pub title: String,

    /// Relative poster path fragment; may be empty
    pub poster_path: String,

    /// Rating at the time of lookup
    pub vote_average: f64,

    /// ISO date, or empty when unknown
    pub release_date: String,
}

/// A durable snapshot of a movie's display fields, stored because the
/// user marked the movie as a favorite.
///
/// Field names match the persisted JSON exactly. The snapshot is never
/// refreshed: if the movie's title or rating changes upstream, the
/// record keeps the values it had at favoriting time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Primary key within the collection
    pub movie_id: u64,

    /// Display title snapshot
    pub title: String,

    /// Poster path snapshot; may be empty
    pub poster_path: String,

    /// Rating snapshot
    pub vote_average: f64,

    /// Release date snapshot (ISO date or empty)
    pub release_date: String,

    /// When the record was created; immutable thereafter
    pub added_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Snapshot a movie summary into a new favorite record
    pub fn from_summary(movie: &MovieSummary) -> Self {
        Self {
            movie_id: movie.id,
            title: movie.title.clone(),
            poster_path: movie.poster_path.clone(),
            vote_average: movie.vote_average,
            release_date: movie.release_date.clone(),
            added_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for FavoriteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.title, self.movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> MovieSummary {
        MovieSummary {
            id: 42,
            title: "X".to_string(),
            poster_path: "/x.jpg".to_string(),
            vote_average: 7.5,
            release_date: "2020-01-01".to_string(),
        }
    }

    #[test]
    fn test_from_summary_copies_display_fields() {
        let record = FavoriteRecord::from_summary(&summary());

        assert_eq!(record.movie_id, 42);
        assert_eq!(record.title, "X");
        assert_eq!(record.poster_path, "/x.jpg");
        assert_eq!(record.vote_average, 7.5);
        assert_eq!(record.release_date, "2020-01-01");
    }

    #[test]
    fn test_persisted_field_names() {
        let record = FavoriteRecord::from_summary(&summary());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["movie_id"], 42);
        assert_eq!(json["title"], "X");
        assert_eq!(json["poster_path"], "/x.jpg");
        assert_eq!(json["release_date"], "2020-01-01");
        assert!(json["added_at"].is_string());
    }

    #[test]
    fn test_deserializes_app_payload() {
        let payload = r#"{
            "movie_id": 7,
            "title": "Seven",
            "poster_path": "",
            "vote_average": 8.6,
            "release_date": "1995-09-22",
            "added_at": "2024-03-01T10:00:00Z"
        }"#;

        let record: FavoriteRecord = serde_json::from_str(payload).unwrap();
        assert_eq!(record.movie_id, 7);
        assert_eq!(record.poster_path, "");
        assert_eq!(record.added_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }
}
