//! In-memory storage implementations

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::movie::{Movie, MovieFilter, NewMovie},
    models::user::{NewUser, User},
    repositories::{MovieStore, UserStore},
};

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::DuplicateAccount);
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            watchlist: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn toggle_watchlist(&self, user_id: Uuid, movie_id: Uuid) -> Result<bool> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::NotFound("User"))?;

        let is_added = match user.watchlist.iter().position(|id| *id == movie_id) {
            Some(index) => {
                user.watchlist.remove(index);
                false
            }
            None => {
                user.watchlist.push(movie_id);
                true
            }
        };
        user.updated_at = Utc::now();
        Ok(is_added)
    }
}

/// In-memory catalog
#[derive(Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<Vec<Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn list(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().filter(|m| filter.matches(m)).cloned().collect())
    }

    async fn find_by_id(&self, movie_id: Uuid) -> Result<Option<Movie>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == movie_id).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Movie>> {
        let movies = self.movies.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| movies.iter().find(|m| m.id == *id).cloned())
            .collect())
    }

    async fn create(&self, new_movie: NewMovie) -> Result<Movie> {
        let movie = new_movie.into_movie(Uuid::new_v4(), Utc::now());
        self.movies.write().await.push(movie.clone());
        Ok(movie)
    }

    async fn delete(&self, movie_id: Uuid) -> Result<bool> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != movie_id);
        Ok(movies.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: Role::User,
        }
    }

    fn new_movie(title: &str) -> NewMovie {
        NewMovie {
            title: title.into(),
            description: "d".into(),
            poster_url: "p".into(),
            backdrop_url: None,
            video_url: "v".into(),
            duration: None,
            year: None,
            genre: vec![],
            rating: 0.0,
            is_trending: false,
            content_rating: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_side_effects() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateAccount));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() {
        let store = InMemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        assert!(store.find_by_email("A@example.com").await.unwrap().is_none());
        assert!(store.create(new_user("A@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn toggle_flips_membership() {
        let store = InMemoryUserStore::new();
        let user = store.create(new_user("t@example.com")).await.unwrap();
        let movie_id = Uuid::new_v4();

        assert!(store.toggle_watchlist(user.id, movie_id).await.unwrap());
        assert!(!store.toggle_watchlist(user.id, movie_id).await.unwrap());
        let user = store.find_by_id(user.id).await.unwrap().unwrap();
        assert!(user.watchlist.is_empty());
    }

    #[tokio::test]
    async fn toggle_for_unknown_user_is_not_found() {
        let store = InMemoryUserStore::new();
        let err = store
            .toggle_watchlist(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_many_keeps_order_and_skips_missing() {
        let store = InMemoryMovieStore::new();
        let a = store.create(new_movie("A")).await.unwrap();
        let b = store.create(new_movie("B")).await.unwrap();

        let resolved = store
            .find_many(&[b.id, Uuid::new_v4(), a.id])
            .await
            .unwrap();
        let titles: Vec<_> = resolved.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["B", "A"]);
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryMovieStore::new();
        let movie = store.create(new_movie("A")).await.unwrap();
        assert!(store.delete(movie.id).await.unwrap());
        assert!(!store.delete(movie.id).await.unwrap());
    }
}
