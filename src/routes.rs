use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::{
    handlers,
    middleware_layer::auth::{require_admin, require_auth},
    services::uploads::UPLOAD_BODY_LIMIT,
    state::AppState,
};

/// Builds the full API router.
///
/// Rate limiting and CORS are added by the binary on top of this.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .with_state(state.clone());

    let authenticated_routes = Router::new()
        .route("/movies", get(handlers::movies::list_movies))
        .route("/movies/{id}", get(handlers::movies::get_movie))
        .route("/users/profile", get(handlers::users::profile))
        .route(
            "/users/watchlist/{movie_id}",
            post(handlers::users::toggle_watchlist),
        )
        .route(
            "/upload/signed-url/{key}",
            get(handlers::upload::signed_url),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route(
            "/admin/movies",
            get(handlers::admin::list_movies).post(handlers::admin::create_movie),
        )
        .route("/admin/movies/{id}", delete(handlers::admin::delete_movie))
        .route("/admin/users", get(handlers::admin::list_users))
        .route(
            "/upload",
            get(handlers::upload::list_files).post(handlers::upload::upload_file),
        )
        .route("/upload/{key}", delete(handlers::upload::delete_file))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false))
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
}
