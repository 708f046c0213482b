//! PostgreSQL store behaviour against a live database.
//!
//! Runs only when `DATABASE_URL` points at a reachable server; otherwise each
//! test returns early. Every test works on freshly generated emails and genre
//! tags so runs never collide with existing rows.

use deadpool_postgres::Pool;
use riyobox::{
    db,
    error::AppError,
    models::movie::{MovieFilter, NewMovie},
    models::user::{NewUser, Role},
    repositories::{MovieStore, PgMovieStore, PgUserStore, UserStore},
    services::auth::{bootstrap_admin, BootstrapOutcome},
};
use tokio::sync::OnceCell;
use uuid::Uuid;

static SCHEMA: OnceCell<()> = OnceCell::const_new();

/// Connects and applies the schema once per test binary.
async fn connect() -> Option<Pool> {
    dotenvy::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
        return None;
    };

    let pool = db::create_pool(&url).expect("invalid DATABASE_URL");
    SCHEMA
        .get_or_init(|| async {
            db::run_migrations(&pool).await.expect("schema migration failed");
        })
        .await;
    Some(pool)
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Pg Test".into(),
        email: email.into(),
        password_hash: "hash".into(),
        role: Role::User,
    }
}

fn new_movie(title: &str, genre: &str, trending: bool) -> NewMovie {
    NewMovie {
        title: title.into(),
        description: "d".into(),
        poster_url: "p".into(),
        backdrop_url: None,
        video_url: "v".into(),
        duration: Some("1h 30m".into()),
        year: Some(2024),
        genre: vec![genre.to_string(), "Shared".into()],
        rating: 6.5,
        is_trending: trending,
        content_rating: None,
    }
}

/// Test: a taken email is `DuplicateAccount` and leaves one row
#[tokio::test]
async fn test_duplicate_email_maps_to_duplicate_account() {
    let Some(pool) = connect().await else { return };
    let users = PgUserStore::new(pool);
    let email = unique_email("dup");

    let first = users.create(new_user(&email)).await.unwrap();
    assert_eq!(first.role, Role::User);
    assert!(first.watchlist.is_empty());

    let err = users.create(new_user(&email)).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateAccount), "got {:?}", err);

    let found = users.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found.id, first.id);
    let matching = users
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|u| u.email == email)
        .count();
    assert_eq!(matching, 1);
}

/// Test: toggle flips membership in place and keeps the rest in order
#[tokio::test]
async fn test_toggle_watchlist_round_trip() {
    let Some(pool) = connect().await else { return };
    let users = PgUserStore::new(pool);
    let user = users.create(new_user(&unique_email("toggle"))).await.unwrap();
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

    assert!(users.toggle_watchlist(user.id, first).await.unwrap());
    assert!(users.toggle_watchlist(user.id, second).await.unwrap());
    assert!(!users.toggle_watchlist(user.id, first).await.unwrap());

    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.watchlist, vec![second]);

    assert!(!users.toggle_watchlist(user.id, second).await.unwrap());
    let stored = users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.watchlist.is_empty());
}

/// Test: toggling for a user that does not exist is `NotFound`
#[tokio::test]
async fn test_toggle_for_unknown_user() {
    let Some(pool) = connect().await else { return };
    let users = PgUserStore::new(pool);

    let err = users
        .toggle_watchlist(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "got {:?}", err);
}

async fn listed_ids(movies: &PgMovieStore, filter: MovieFilter) -> Vec<Uuid> {
    movies
        .list(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect()
}

/// Test: listing follows insertion order and honours both filters
#[tokio::test]
async fn test_list_filters_in_insertion_order() {
    let Some(pool) = connect().await else { return };
    let movies = PgMovieStore::new(pool);
    let tag = format!("genre-{}", Uuid::new_v4());

    let a = movies.create(new_movie("A", &tag, true)).await.unwrap();
    let b = movies.create(new_movie("B", &tag, false)).await.unwrap();
    let c = movies.create(new_movie("C", &tag, true)).await.unwrap();
    assert_eq!(a.genre, [tag.as_str(), "Shared"]);
    assert_eq!(a.rating, 6.5);

    assert_eq!(
        listed_ids(&movies, MovieFilter { genre: Some(tag.clone()), trending: None }).await,
        [a.id, b.id, c.id]
    );
    assert_eq!(
        listed_ids(&movies, MovieFilter { genre: Some(tag.clone()), trending: Some(true) }).await,
        [a.id, c.id]
    );
    assert_eq!(
        listed_ids(&movies, MovieFilter { genre: Some(tag.clone()), trending: Some(false) }).await,
        [b.id]
    );

    let trending = listed_ids(&movies, MovieFilter { genre: None, trending: Some(true) }).await;
    assert!(trending.contains(&a.id) && trending.contains(&c.id));
    assert!(!trending.contains(&b.id));
}

/// Test: `find_many` keeps the requested order and drops missing or deleted ids
#[tokio::test]
async fn test_find_many_order_and_dangling_ids() {
    let Some(pool) = connect().await else { return };
    let movies = PgMovieStore::new(pool);
    let tag = format!("genre-{}", Uuid::new_v4());

    let a = movies.create(new_movie("A", &tag, false)).await.unwrap();
    let b = movies.create(new_movie("B", &tag, false)).await.unwrap();

    let resolved = movies
        .find_many(&[b.id, Uuid::new_v4(), a.id])
        .await
        .unwrap();
    let titles: Vec<_> = resolved.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, ["B", "A"]);

    assert!(movies.delete(b.id).await.unwrap());
    assert!(!movies.delete(b.id).await.unwrap());
    assert!(movies.find_by_id(b.id).await.unwrap().is_none());

    let resolved = movies.find_many(&[b.id, a.id]).await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, a.id);

    assert!(movies.find_many(&[]).await.unwrap().is_empty());
}

/// Test: two concurrent bootstraps create exactly one admin
#[tokio::test]
async fn test_concurrent_bootstrap_creates_one_admin() {
    let Some(pool) = connect().await else { return };
    let users = PgUserStore::new(pool);
    let email = unique_email("admin");

    let (first, second) = tokio::join!(
        bootstrap_admin(&users, &email, "admin123"),
        bootstrap_admin(&users, &email, "admin123"),
    );
    let outcomes = [first.unwrap(), second.unwrap()];
    let created = outcomes
        .iter()
        .filter(|o| **o == BootstrapOutcome::Created)
        .count();
    assert_eq!(created, 1, "outcomes: {:?}", outcomes);

    let admin = users.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.name, "Super Admin");
}

/// Test: ping succeeds against a reachable server
#[tokio::test]
async fn test_ping() {
    let Some(pool) = connect().await else { return };
    assert!(PgUserStore::new(pool).ping().await.is_ok());
}
