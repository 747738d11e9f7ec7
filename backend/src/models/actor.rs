//! The authenticated caller as resolved from the bearer token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

text_enum! {
    /// Roles understood by the inventory API.
    pub enum UserRole {
        /// Full access including credentials and maintenance endpoints.
        Admin => "admin",
        /// May create and edit inventory and assignments.
        Editor => "editor",
        /// Read-only access.
        Viewer => "viewer",
    }
}

/// Capabilities checked by handlers before dispatching to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ReadInventory,
    WriteInventory,
    ManageCredentials,
    Administer,
}

impl UserRole {
    pub fn allows(&self, permission: Permission) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Editor => matches!(
                permission,
                Permission::ReadInventory | Permission::WriteInventory
            ),
            UserRole::Viewer => permission == Permission::ReadInventory,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    /// Stable identifier recorded as `user_id` in the activity log.
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl Actor {
    pub const SYSTEM_ID: &'static str = "system";

    /// Actor used by maintenance jobs that run outside a request.
    pub fn system() -> Self {
        Self {
            id: Self::SYSTEM_ID.to_string(),
            username: Self::SYSTEM_ID.to_string(),
            role: UserRole::Admin,
        }
    }

    pub fn can(&self, permission: Permission) -> bool {
        self.role.allows(permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), AppError> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Forbidden".into()))
        }
    }
}
