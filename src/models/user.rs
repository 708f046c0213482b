use chrono::{DateTime, Utc};
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The closed set of roles an account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSql, FromSql)]
#[serde(rename_all = "lowercase")]
#[postgres(name = "user_role")]
pub enum Role {
    #[postgres(name = "user")]
    User,
    #[postgres(name = "admin")]
    Admin,
}

impl Role {
    /// Whether this role may manage the catalog, the bucket and the user list.
    pub fn can_administer(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether an identity holding this role passes a gate that requires `required`.
    pub fn satisfies(self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => self.can_administer(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a user in the system.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's display name.
    pub name: String,
    /// The user's email address, unique and compared as stored.
    pub email: String,
    /// The user's Argon2 password hash (PHC string).
    pub password_hash: String,
    /// The user's role.
    pub role: Role,
    /// Saved catalog references, in the order they were added.
    pub watchlist: Vec<Uuid>,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The fields needed to insert a user.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// A user as exposed over the API, without the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub watchlist: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            watchlist: user.watchlist.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_satisfies_admin_gate() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(!Role::User.satisfies(Role::Admin));
        assert!(Role::User.satisfies(Role::User));
        assert!(Role::Admin.satisfies(Role::User));
    }

    #[test]
    fn wire_names_match_display() {
        for role in [Role::User, Role::Admin] {
            let json = sonic_rs::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
            assert_eq!(sonic_rs::from_str::<Role>(&json).unwrap(), role);
        }
        assert!(sonic_rs::from_str::<Role>("\"Admin\"").is_err());
    }
}
