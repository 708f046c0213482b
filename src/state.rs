use anyhow::Context;
use std::sync::Arc;

use crate::config::Config;
use crate::crypto::token::TokenIssuer;
use crate::repositories::{MovieStore, PgMovieStore, PgUserStore, UserStore};
use crate::storage::{ObjectStore, S3ObjectStore};

/// The application's state.
///
/// Every handle is built once at startup and shared by cloning the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Accounts and watchlists.
    pub users: Arc<dyn UserStore>,
    /// The movie catalog.
    pub movies: Arc<dyn MovieStore>,
    /// The upload bucket.
    pub objects: Arc<dyn ObjectStore>,
    /// Session token signer.
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Assembles a state from already-built collaborators.
    pub fn from_parts(
        users: Arc<dyn UserStore>,
        movies: Arc<dyn MovieStore>,
        objects: Arc<dyn ObjectStore>,
        tokens: TokenIssuer,
    ) -> Self {
        Self { users, movies, objects, tokens }
    }

    /// Connects to PostgreSQL, applies the schema and builds the storage client.
    ///
    /// Fails if the database cannot be reached.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db = crate::db::create_pool(&config.database_url)
            .context("Invalid DATABASE_URL")?;
        crate::db::run_migrations(&db)
            .await
            .context("Failed to connect to PostgreSQL and apply schema")?;
        tracing::info!("✅ PostgreSQL pool initialized and schema applied");

        let objects = S3ObjectStore::from_config(&config.storage).await;

        let tokens = TokenIssuer::new(
            &config.jwt_secret,
            chrono::Duration::hours(config.token_ttl_hours),
        );
        tracing::info!("✅ Token issuer ready ({}h validity)", config.token_ttl_hours);

        Ok(Self::from_parts(
            Arc::new(PgUserStore::new(db.clone())),
            Arc::new(PgMovieStore::new(db)),
            Arc::new(objects),
            tokens,
        ))
    }
}
