use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;

use crate::{
    error::Result,
    models::session::Identity,
    services::watchlist::{self as watchlist_service, Profile},
    state::AppState,
};

/// The response payload for a watchlist toggle.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub message: String,
    pub is_added: bool,
}

/// Returns the caller's profile with the watchlist resolved.
pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Profile>> {
    let profile = watchlist_service::profile(&state, identity.user_id).await?;
    Ok(Json(profile))
}

/// Adds the movie to the caller's watchlist, or removes it if already there.
pub async fn toggle_watchlist(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(movie_id): Path<String>,
) -> Result<Json<ToggleResponse>> {
    let is_added = watchlist_service::toggle(&state, identity.user_id, &movie_id).await?;
    let message = if is_added {
        "Added to watchlist"
    } else {
        "Removed from watchlist"
    };
    Ok(Json(ToggleResponse {
        message: message.to_string(),
        is_added,
    }))
}
