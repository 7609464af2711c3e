//! User service layer.
//!
//! Resolves identities returned by the OAuth provider into local user rows,
//! creating them on first sign-in. Reads go through the user cache first and
//! fall back to the database; cache failures are logged and never fail a request.

use sea_orm::{DatabaseConnection, SqlErr};

use crate::server::{
    data::user::{NewUser, UserRepository},
    error::{auth::AuthError, Error},
    identity::UserInfo,
    model::{app::Store, db::UserModel},
    service::{retry::RetryContext, role::DEFAULT_ROLE},
};

/// Service for resolving and reading user accounts.
pub struct UserService<'a> {
    store: &'a Store,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Local user for a verified identity, created on first sign-in.
    ///
    /// # Arguments
    /// - `userinfo` - Identity returned by the OAuth userinfo endpoint
    ///
    /// # Returns
    /// - `Ok(UserModel)` - Existing or newly created user
    /// - `Err(Error::AuthError(InvalidSubject))` - `sub` is not a 64-bit integer
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn take_user(&self, userinfo: &UserInfo) -> Result<UserModel, Error> {
        let user_id: i64 = userinfo
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidSubject(userinfo.sub.clone()))?;

        if let Some(user) = self.cached(user_id).await {
            return Ok(user);
        }

        let user = match self.fetch(user_id).await? {
            Some(user) => user,
            None => self.create(user_id, userinfo).await?,
        };

        self.cache(&user).await;

        Ok(user)
    }

    async fn fetch(&self, user_id: i64) -> Result<Option<UserModel>, Error> {
        let mut ctx: RetryContext<()> = RetryContext::new();

        let db = self.store.db.clone();

        ctx.execute_with_retry(&format!("user lookup for ID {}", user_id), |_| {
            let db = db.clone();

            Box::pin(async move { Ok(UserRepository::new(&db).get(user_id).await?) })
        })
        .await
    }

    async fn create(&self, user_id: i64, userinfo: &UserInfo) -> Result<UserModel, Error> {
        let username = if userinfo.nickname.trim().is_empty() {
            userinfo.sub.as_str()
        } else {
            userinfo.nickname.trim()
        };

        let new_user = NewUser {
            id: user_id,
            username,
            email: non_empty(&userinfo.email),
            phone: non_empty(&userinfo.phone),
            role_name: DEFAULT_ROLE,
        };

        match UserRepository::new(&self.store.db).create(new_user).await {
            Ok(user) => {
                tracing::info!(user_id, "Created user on first sign-in");
                Ok(user)
            }
            // A concurrent sign-in inserted the row first
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                re_read(&self.store.db, user_id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn cached(&self, user_id: i64) -> Option<UserModel> {
        match self.store.cache.get(user_id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(user_id, "Failed to read user from cache: {}", e);
                None
            }
        }
    }

    async fn cache(&self, user: &UserModel) {
        if let Err(e) = self.store.cache.set(user).await {
            tracing::warn!(user_id = user.id, "Failed to write user to cache: {}", e);
        }
    }
}

async fn re_read(db: &DatabaseConnection, user_id: i64) -> Result<UserModel, Error> {
    UserRepository::new(db)
        .get(user_id)
        .await?
        .ok_or_else(|| {
            Error::InternalError(format!(
                "User ID {} reported as duplicate but could not be read back",
                user_id
            ))
        })
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
