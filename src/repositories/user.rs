use async_trait::async_trait;
use deadpool_postgres::Pool;
use tokio_postgres::{error::SqlState, Row};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::user::{NewUser, User},
    repositories::UserStore,
};

const USER_COLUMNS: &str =
    "id, name, email, password, role, watchlist, created_at, updated_at";

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password")?,
        role: row.try_get("role")?,
        watchlist: row.try_get("watchlist")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// PostgreSQL-backed user store.
#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn ping(&self) -> Result<()> {
        let client = self.pool.get().await?;
        client.simple_query("SELECT 1").await?;
        Ok(())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let client = self.pool.get().await?;
        let query = format!(
            r#"
            INSERT INTO users (id, name, email, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );
        let result = client
            .query_one(
                &query,
                &[
                    &Uuid::new_v4(),
                    &new_user.name,
                    &new_user.email,
                    &new_user.password_hash,
                    &new_user.role,
                ],
            )
            .await;

        match result {
            Ok(row) => row_to_user(&row),
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(AppError::DuplicateAccount)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = client.query_opt(&query, &[&email]).await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = client.query_opt(&query, &[&user_id]).await?;
        row.map(|r| row_to_user(&r)).transpose()
    }

    async fn list(&self) -> Result<Vec<User>> {
        let client = self.pool.get().await?;
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, id");
        let rows = client.query(&query, &[]).await?;
        rows.iter().map(row_to_user).collect()
    }

    async fn toggle_watchlist(&self, user_id: Uuid, movie_id: Uuid) -> Result<bool> {
        let client = self.pool.get().await?;
        let row = client
            .query_opt(
                r#"
                UPDATE users
                SET
                    watchlist = CASE
                        WHEN $2 = ANY(watchlist) THEN array_remove(watchlist, $2)
                        ELSE array_append(watchlist, $2)
                    END,
                    updated_at = NOW()
                WHERE id = $1
                RETURNING $2 = ANY(watchlist) AS is_added
                "#,
                &[&user_id, &movie_id],
            )
            .await?
            .ok_or(AppError::NotFound("User"))?;
        Ok(row.try_get("is_added")?)
    }
}
