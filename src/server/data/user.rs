use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

use crate::server::model::db::UserModel;

/// Fields of a user created on first sign-in.
pub struct NewUser<'a> {
    pub id: i64,
    pub username: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub role_name: &'a str,
}

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new, unbanned user
    pub async fn create(&self, new_user: NewUser<'_>) -> Result<UserModel, DbErr> {
        let now = Utc::now().naive_utc();

        let user = entity::user::ActiveModel {
            id: ActiveValue::Set(new_user.id),
            username: ActiveValue::Set(new_user.username.to_string()),
            email: ActiveValue::Set(new_user.email.map(str::to_string)),
            phone: ActiveValue::Set(new_user.phone.map(str::to_string)),
            role_name: ActiveValue::Set(Some(new_user.role_name.to_string())),
            has_ban: ActiveValue::Set(false),
            jailed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<UserModel>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }
}
