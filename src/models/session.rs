use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::user::Role;

/// The identity a verified bearer token resolves to.
///
/// Inserted into the request extensions by `require_auth`; handlers read it
/// with `Extension<Identity>`. Nothing here is looked up again from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The ID of the authenticated user.
    pub user_id: Uuid,
    /// The role embedded in the token at issuance.
    pub role: Role,
}

impl Identity {
    /// Fails with `Forbidden` unless this identity's role satisfies `required`.
    pub fn require_role(&self, required: Role) -> Result<()> {
        if self.role.satisfies(required) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}
