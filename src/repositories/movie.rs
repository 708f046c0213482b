use async_trait::async_trait;
use chrono::Utc;
use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{
    error::Result,
    models::movie::{Movie, MovieFilter, NewMovie},
    repositories::MovieStore,
};

const MOVIE_COLUMNS: &str = "id, title, description, poster_url, backdrop_url, video_url, \
     duration, year, genre, rating, is_trending, content_rating, created_at, updated_at";

fn row_to_movie(row: &Row) -> Result<Movie> {
    Ok(Movie {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        poster_url: row.try_get("poster_url")?,
        backdrop_url: row.try_get("backdrop_url")?,
        video_url: row.try_get("video_url")?,
        duration: row.try_get("duration")?,
        year: row.try_get("year")?,
        genre: row.try_get("genre")?,
        rating: row.try_get("rating")?,
        is_trending: row.try_get("is_trending")?,
        content_rating: row.try_get("content_rating")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// PostgreSQL-backed catalog.
#[derive(Clone)]
pub struct PgMovieStore {
    pool: Pool,
}

impl PgMovieStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieStore for PgMovieStore {
    async fn list(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let client = self.pool.get().await?;
        // NULL parameters disable their predicate.
        let query = format!(
            r#"
            SELECT {MOVIE_COLUMNS}
            FROM movies
            WHERE ($1::text IS NULL OR $1 = ANY(genre))
              AND ($2::boolean IS NULL OR is_trending = $2)
            ORDER BY seq
            "#
        );
        let rows = client
            .query(&query, &[&filter.genre, &filter.trending])
            .await?;
        rows.iter().map(row_to_movie).collect()
    }

    async fn find_by_id(&self, movie_id: Uuid) -> Result<Option<Movie>> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1");
        let row = client.query_opt(&query, &[&movie_id]).await?;
        row.map(|r| row_to_movie(&r)).transpose()
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Movie>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let client = self.pool.get().await?;
        let rows = client
            .query(
                r#"
                SELECT m.*
                FROM unnest($1::uuid[]) WITH ORDINALITY AS w(id, ord)
                JOIN movies m ON m.id = w.id
                ORDER BY w.ord
                "#,
                &[&ids],
            )
            .await?;
        rows.iter().map(row_to_movie).collect()
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie> {
        let client = self.pool.get().await?;
        let movie = new_movie.into_movie(Uuid::new_v4(), Utc::now());
        let query = format!(
            r#"
            INSERT INTO movies (
                id, title, description, poster_url, backdrop_url, video_url,
                duration, year, genre, rating, is_trending, content_rating,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {MOVIE_COLUMNS}
            "#
        );
        let row = client
            .query_one(
                &query,
                &[
                    &movie.id,
                    &movie.title,
                    &movie.description,
                    &movie.poster_url,
                    &movie.backdrop_url,
                    &movie.video_url,
                    &movie.duration,
                    &movie.year,
                    &movie.genre,
                    &movie.rating,
                    &movie.is_trending,
                    &movie.content_rating,
                    &movie.created_at,
                    &movie.updated_at,
                ],
            )
            .await?;
        row_to_movie(&row)
    }

    async fn delete(&self, movie_id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let deleted = client
            .execute("DELETE FROM movies WHERE id = $1", &[&movie_id])
            .await?;
        Ok(deleted > 0)
    }
}
