use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// The unique identifier for the movie.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub video_url: String,
    /// Free-form running time, e.g. "2h 14m".
    pub duration: Option<String>,
    pub year: Option<i32>,
    pub genre: Vec<String>,
    pub rating: f64,
    pub is_trending: bool,
    /// Age classification such as "PG-13".
    pub content_rating: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The validated fields needed to insert a movie.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub video_url: String,
    pub duration: Option<String>,
    pub year: Option<i32>,
    pub genre: Vec<String>,
    pub rating: f64,
    pub is_trending: bool,
    pub content_rating: Option<String>,
}

impl NewMovie {
    /// Materializes the record with a fresh id and timestamps.
    pub fn into_movie(self, id: Uuid, now: DateTime<Utc>) -> Movie {
        Movie {
            id,
            title: self.title,
            description: self.description,
            poster_url: self.poster_url,
            backdrop_url: self.backdrop_url,
            video_url: self.video_url,
            duration: self.duration,
            year: self.year,
            genre: self.genre,
            rating: self.rating,
            is_trending: self.is_trending,
            content_rating: self.content_rating,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog listing filters. Both absent means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    /// Keep only movies whose genre set contains this tag.
    pub genre: Option<String>,
    /// Keep only movies whose trending flag equals this value.
    pub trending: Option<bool>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        let genre_ok = self
            .genre
            .as_ref()
            .is_none_or(|g| movie.genre.iter().any(|m| m == g));
        let trending_ok = self.trending.is_none_or(|t| movie.is_trending == t);
        genre_ok && trending_ok
    }
}

/// Parses a movie reference, failing with `InvalidIdentifier` when malformed.
pub fn parse_movie_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidIdentifier("movie"))
}
