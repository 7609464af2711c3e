use sea_orm::DatabaseConnection;

use crate::server::{
    data::role::RoleRepository,
    error::{auth::AuthError, Error},
    model::db::RoleModel,
};

/// Role assigned to every user created on first sign-in.
pub const DEFAULT_ROLE: &str = "PLAYER";

/// Roles present in every deployment, as `(name, display_name, description)`.
pub const SYSTEM_ROLES: [(&str, &str, &str); 3] = [
    ("SUPER_ADMIN", "Super administrator", "Full access to every resource"),
    ("ADMIN", "Administrator", "Manages users and game profiles"),
    (DEFAULT_ROLE, "Player", "Regular player account"),
];

/// Check a role name is 2-32 characters of `A-Z` or `_`.
pub fn validate_role_name(name: &str) -> Result<(), AuthError> {
    let valid_len = (2..=32).contains(&name.len());
    let valid_chars = name.chars().all(|c| c.is_ascii_uppercase() || c == '_');

    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(AuthError::InvalidRoleName(name.to_string()))
    }
}

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    /// Creates a new instance of [`RoleService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or refresh a role after validating its name
    pub async fn upsert_role(
        &self,
        name: &str,
        display_name: &str,
        description: &str,
    ) -> Result<RoleModel, Error> {
        validate_role_name(name)?;

        Ok(RoleRepository::new(self.db)
            .upsert(name, display_name, description)
            .await?)
    }

    /// Upsert every system role; safe to run on each startup
    pub async fn seed_system_roles(&self) -> Result<Vec<RoleModel>, Error> {
        let mut roles = Vec::with_capacity(SYSTEM_ROLES.len());

        for (name, display_name, description) in SYSTEM_ROLES {
            roles.push(self.upsert_role(name, display_name, description).await?);
        }

        tracing::info!(count = roles.len(), "Seeded system roles");

        Ok(roles)
    }
}
