use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::Result,
    models::movie::{Movie, MovieFilter},
    services::movies as movie_service,
    state::AppState,
};

/// The query parameters for listing movies.
#[derive(Deserialize, Default)]
pub struct ListMoviesQuery {
    pub genre: Option<String>,
    #[serde(rename = "isTrending")]
    pub is_trending: Option<String>,
}

impl ListMoviesQuery {
    /// Empty parameters are ignored; `isTrending` is true only for the literal `true`.
    pub fn into_filter(self) -> MovieFilter {
        MovieFilter {
            genre: self.genre.filter(|g| !g.is_empty()),
            trending: self
                .is_trending
                .filter(|t| !t.is_empty())
                .map(|t| t == "true"),
        }
    }
}

/// Lists the catalog, optionally filtered.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<ListMoviesQuery>,
) -> Result<Json<Vec<Movie>>> {
    let movies = movie_service::list_movies(&state, &query.into_filter()).await?;
    Ok(Json(movies))
}

/// Fetches a single movie.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Movie>> {
    let movie = movie_service::get_movie(&state, &movie_id).await?;
    Ok(Json(movie))
}
