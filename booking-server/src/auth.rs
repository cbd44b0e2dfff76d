//! Authenticated caller context
//!
//! Authentication itself happens outside this crate. Every operation that
//! acts on behalf of a user receives an [`Actor`].

use crate::appointments::BookingError;
use serde::{Deserialize, Serialize};
use shared::models::UserRole;

/// `(user_id, role)` of the authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: i64,
    pub role: UserRole,
}

impl Actor {
    pub fn client(user_id: i64) -> Self {
        Self {
            user_id,
            role: UserRole::Client,
        }
    }

    pub fn provider(user_id: i64) -> Self {
        Self {
            user_id,
            role: UserRole::Provider,
        }
    }

    pub fn is_provider(&self) -> bool {
        self.role == UserRole::Provider
    }

    /// Fail with `Forbidden` unless the actor has `role`
    pub fn require_role(&self, role: UserRole) -> Result<(), BookingError> {
        if self.role == role {
            Ok(())
        } else {
            Err(BookingError::Forbidden(format!(
                "This action requires the {role} role"
            )))
        }
    }
}
