use crate::error::{AppError, Result};
use crate::models::movie::NewMovie;
use crate::services::movies::MovieDraft;

const MAX_RATING: f64 = 10.0;

fn required(field: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

/// Turns a submitted draft into an insertable movie, applying defaults.
///
/// `title`, `description`, `posterUrl` and `videoUrl` are mandatory.
pub fn validate_movie_draft(draft: MovieDraft) -> Result<NewMovie> {
    let title = required("title", draft.title)?;
    let description = required("description", draft.description)?;
    let poster_url = required("posterUrl", draft.poster_url)?;
    let video_url = required("videoUrl", draft.video_url)?;

    let rating = draft.rating.unwrap_or(0.0);
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(AppError::Validation(format!(
            "rating must be between 0 and {}",
            MAX_RATING
        )));
    }

    let genre = draft
        .genre
        .unwrap_or_default()
        .into_iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    Ok(NewMovie {
        title,
        description,
        poster_url,
        backdrop_url: draft.backdrop_url.filter(|u| !u.trim().is_empty()),
        video_url,
        duration: draft.duration,
        year: draft.year,
        genre,
        rating,
        is_trending: draft.is_trending.unwrap_or(false),
        content_rating: draft.content_rating,
    })
}
