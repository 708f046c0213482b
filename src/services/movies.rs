use serde::Deserialize;

use crate::{
    error::{AppError, Result},
    models::movie::{parse_movie_id, Movie, MovieFilter},
    state::AppState,
    validation::movie::validate_movie_draft,
};

/// A movie as submitted by the admin console. Every field is optional at the
/// wire level; `validate_movie_draft` decides what is mandatory.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub video_url: Option<String>,
    pub duration: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub is_trending: Option<bool>,
    pub content_rating: Option<String>,
}

/// Lists movies matching `filter`.
pub async fn list_movies(state: &AppState, filter: &MovieFilter) -> Result<Vec<Movie>> {
    state.movies.list(filter).await
}

/// Fetches one movie by its raw path identifier.
pub async fn get_movie(state: &AppState, raw_id: &str) -> Result<Movie> {
    let movie_id = parse_movie_id(raw_id)?;
    state
        .movies
        .find_by_id(movie_id)
        .await?
        .ok_or(AppError::NotFound("Movie"))
}

/// Validates and inserts a movie.
pub async fn create_movie(state: &AppState, draft: MovieDraft) -> Result<Movie> {
    let new_movie = validate_movie_draft(draft)?;
    let movie = state.movies.create(new_movie).await?;
    tracing::info!("🎬 Movie created: {} ({})", movie.title, movie.id);
    Ok(movie)
}

/// Permanently removes a movie. Watchlist references to it are left in place.
pub async fn delete_movie(state: &AppState, raw_id: &str) -> Result<()> {
    let movie_id = parse_movie_id(raw_id)?;
    if !state.movies.delete(movie_id).await? {
        return Err(AppError::NotFound("Movie"));
    }
    tracing::info!("🗑️ Movie removed: {}", movie_id);
    Ok(())
}
