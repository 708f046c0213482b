//! Persistence seams for accounts and the catalog.

pub mod memory;
pub mod movie;
pub mod user;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::movie::{Movie, MovieFilter, NewMovie};
use crate::models::user::{NewUser, User};

pub use memory::{InMemoryMovieStore, InMemoryUserStore};
pub use movie::PgMovieStore;
pub use user::PgUserStore;

/// Storage for user accounts and their watchlists.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Inserts a user. Fails with `DuplicateAccount` if the email is taken,
    /// leaving the store untouched.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Finds a user by exact email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Lists every user in creation order.
    async fn list(&self) -> Result<Vec<User>>;

    /// Flips `movie_id` in the user's watchlist as one atomic update.
    ///
    /// Returns `true` when the movie is in the list afterwards. The movie is
    /// not checked against the catalog.
    async fn toggle_watchlist(&self, user_id: Uuid, movie_id: Uuid) -> Result<bool>;
}

/// Storage for catalog items.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Lists movies matching `filter`, in insertion order.
    async fn list(&self, filter: &MovieFilter) -> Result<Vec<Movie>>;

    /// Finds a movie by ID.
    async fn find_by_id(&self, movie_id: Uuid) -> Result<Option<Movie>>;

    /// Resolves `ids` in the given order, silently skipping ids with no record.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Movie>>;

    /// Inserts a movie.
    async fn create(&self, new_movie: NewMovie) -> Result<Movie>;

    /// Deletes a movie. Returns `false` if there was nothing to delete.
    async fn delete(&self, movie_id: Uuid) -> Result<bool>;
}
