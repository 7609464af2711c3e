//! Role and user database insertion utilities.

use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::TEST_SYSTEM_ROLES,
    error::TestError,
    fixtures::user::UserFixtures,
    model::{RoleModel, UserModel},
};

impl<'a> UserFixtures<'a> {
    /// Insert the `SUPER_ADMIN`, `ADMIN` and `PLAYER` roles.
    pub async fn insert_system_roles(&self) -> Result<Vec<RoleModel>, TestError> {
        let mut roles = Vec::with_capacity(TEST_SYSTEM_ROLES.len());

        for (name, display_name, description) in TEST_SYSTEM_ROLES {
            let role = entity::prelude::Role::insert(entity::role::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                display_name: ActiveValue::Set(display_name.to_string()),
                description: ActiveValue::Set(description.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.setup.db)
            .await?;

            roles.push(role);
        }

        Ok(roles)
    }

    /// Insert a `PLAYER` user with the given id and username.
    ///
    /// Requires the system roles, which `with_user_tables()` seeds.
    pub async fn insert_user(&self, user_id: i64, username: &str) -> Result<UserModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::User::insert(entity::user::ActiveModel {
                id: ActiveValue::Set(user_id),
                username: ActiveValue::Set(username.to_string()),
                email: ActiveValue::Set(None),
                phone: ActiveValue::Set(None),
                role_name: ActiveValue::Set(Some("PLAYER".to_string())),
                has_ban: ActiveValue::Set(false),
                jailed_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
