use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::password;
use crate::error::{AppError, Result};
use crate::models::user::{NewUser, Role, User};
use crate::repositories::UserStore;
use crate::state::AppState;

/// Display name given to the first-boot administrator.
const BOOTSTRAP_ADMIN_NAME: &str = "Super Admin";

/// The payload for self-service registration.
#[derive(Deserialize, Validate)]
pub struct Registration {
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6, max = 128))]
    pub password: String,
}

/// The payload for login.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// A freshly issued session and the account it belongs to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    /// Token validity in seconds.
    pub expires_in: i64,
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// What `bootstrap_admin` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
}

async fn hash_blocking(plain: String) -> Result<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
}

fn issue_session(state: &AppState, user: &User) -> Result<AuthSession> {
    let token = state.tokens.issue(user.id, user.role)?;
    Ok(AuthSession {
        token,
        expires_in: state.tokens.ttl().num_seconds(),
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    })
}

/// Creates a `user`-role account and signs it in.
///
/// Fails with `DuplicateAccount` if the email is taken.
pub async fn register(state: &AppState, registration: Registration) -> Result<AuthSession> {
    tracing::debug!("📝 Registering {}", registration.email);

    let password_hash = hash_blocking(registration.password).await?;
    let user = state
        .users
        .create(NewUser {
            name: registration.name.trim().to_string(),
            email: registration.email,
            password_hash,
            role: Role::User,
        })
        .await?;

    tracing::info!("✅ User registered: {}", user.id);
    issue_session(state, &user)
}

/// Checks an email/password pair and signs the account in.
///
/// Unknown email and wrong password both fail with `InvalidCredentials`
/// after the same amount of hashing work.
pub async fn authenticate(state: &AppState, credentials: Credentials) -> Result<AuthSession> {
    tracing::debug!("🔐 Authenticating {}", credentials.email);

    let user = state.users.find_by_email(&credentials.email).await?;
    let plain = credentials.password;

    let (user, valid) = tokio::task::spawn_blocking(move || -> Result<(Option<User>, bool)> {
        match user {
            Some(user) => {
                let valid = password::verify_password(&plain, &user.password_hash)?;
                Ok((Some(user), valid))
            }
            None => {
                password::verify_dummy(&plain);
                Ok((None, false))
            }
        }
    })
    .await
    .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;

    let user = match (user, valid) {
        (Some(user), true) => user,
        _ => return Err(AppError::InvalidCredentials),
    };

    tracing::info!("✅ User authenticated: {}", user.id);
    issue_session(state, &user)
}

/// Ensures the well-known administrator account exists.
///
/// Losing a creation race to another process counts as already present.
pub async fn bootstrap_admin(
    users: &dyn UserStore,
    email: &str,
    password: &str,
) -> Result<BootstrapOutcome> {
    if users.find_by_email(email).await?.is_some() {
        tracing::info!("ℹ️ Admin account already exists: {}", email);
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    tracing::info!("Creating default admin account...");
    let password_hash = hash_blocking(password.to_string()).await?;
    let created = users
        .create(NewUser {
            name: BOOTSTRAP_ADMIN_NAME.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await;

    match created {
        Ok(admin) => {
            tracing::info!("✅ Default admin created: {}", admin.email);
            Ok(BootstrapOutcome::Created)
        }
        Err(AppError::DuplicateAccount) => {
            tracing::info!("ℹ️ Admin account created concurrently: {}", email);
            Ok(BootstrapOutcome::AlreadyPresent)
        }
        Err(e) => Err(e),
    }
}
