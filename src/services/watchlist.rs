use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::movie::{parse_movie_id, Movie},
    models::user::PublicUser,
    state::AppState,
};

/// A user with the watchlist resolved to full catalog items.
#[derive(Debug, Serialize)]
pub struct Profile {
    pub user: PublicUser,
    pub watchlist: Vec<Movie>,
}

/// Flips `raw_movie_id` in the user's watchlist. Returns whether it is now present.
///
/// The movie is not looked up in the catalog first.
pub async fn toggle(state: &AppState, user_id: Uuid, raw_movie_id: &str) -> Result<bool> {
    let movie_id = parse_movie_id(raw_movie_id)?;
    let is_added = state.users.toggle_watchlist(user_id, movie_id).await?;
    tracing::debug!(
        "Watchlist toggle for {}: {} {}",
        user_id,
        movie_id,
        if is_added { "added" } else { "removed" }
    );
    Ok(is_added)
}

/// Loads the user and resolves their watchlist; deleted movies are skipped.
pub async fn profile(state: &AppState, user_id: Uuid) -> Result<Profile> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    let watchlist = state.movies.find_many(&user.watchlist).await?;

    Ok(Profile {
        user: PublicUser::from(&user),
        watchlist,
    })
}
