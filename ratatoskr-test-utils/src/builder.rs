//! Declarative test builder.
//!
//! Configuration methods queue work; `build()` executes it in order: tables,
//! then database fixtures, then mock HTTP endpoints.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_user_tables: bool,
    include_game_profile_tables: bool,

    users: Vec<(i64, String)>,
    quotas: Vec<(i64, i32, i32)>, // (user_id, total, used)
    profiles: Vec<(i64, String)>, // (user_id, name)

    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    userinfo_endpoints: Vec<(String, i64, String, usize)>, // (token, sub, nickname, expected_requests)
    userinfo_error_endpoints: Vec<(String, usize, usize)>, // (token, status, expected_requests)
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_user_tables: false,
            include_game_profile_tables: false,
            users: Vec::new(),
            quotas: Vec::new(),
            profiles: Vec::new(),
            mock_builders: Vec::new(),
            userinfo_endpoints: Vec::new(),
            userinfo_error_endpoints: Vec::new(),
        }
    }

    /// Create the `role` and `user` tables and seed the system roles.
    pub fn with_user_tables(mut self) -> Self {
        self.include_user_tables = true;
        self
    }

    /// Create the profile, quota and quota log tables along with the user tables.
    pub fn with_game_profile_tables(mut self) -> Self {
        self.include_user_tables = true;
        self.include_game_profile_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use ratatoskr_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), ratatoskr_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(Role).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with role `PLAYER` during `build()`.
    pub fn with_user(mut self, user_id: i64, username: impl Into<String>) -> Self {
        self.users.push((user_id, username.into()));
        self
    }

    /// Insert a quota row for an existing user during `build()`.
    pub fn with_quota(mut self, user_id: i64, total: i32, used: i32) -> Self {
        self.quotas.push((user_id, total, used));
        self
    }

    /// Insert a game profile for an existing user during `build()`.
    ///
    /// The quota row is left untouched; pair with `with_quota` to keep `used` in step.
    pub fn with_profile(mut self, user_id: i64, name: impl Into<String>) -> Self {
        self.profiles.push((user_id, name.into()));
        self
    }

    /// Mock the userinfo endpoint to accept `token` and resolve it to `sub`.
    pub fn with_userinfo_endpoint(
        mut self,
        token: impl Into<String>,
        sub: i64,
        nickname: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.userinfo_endpoints
            .push((token.into(), sub, nickname.into(), expected_requests));
        self
    }

    /// Mock the userinfo endpoint to reject `token` with the given HTTP status.
    pub fn with_userinfo_error_endpoint(
        mut self,
        token: impl Into<String>,
        status: usize,
        expected_requests: usize,
    ) -> Self {
        self.userinfo_error_endpoints
            .push((token.into(), status, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full access to the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables, parents before children for foreign keys
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut all_tables = Vec::new();

        if self.include_user_tables {
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Role),
                schema.create_table_from_entity(entity::prelude::User),
            ]);
        }

        if self.include_game_profile_tables {
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::GameProfile),
                schema.create_table_from_entity(entity::prelude::GameProfileQuota),
                schema.create_table_from_entity(entity::prelude::GameProfileQuotaLog),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        if self.include_user_tables {
            setup.user().insert_system_roles().await?;
        }

        for (user_id, username) in self.users {
            setup.user().insert_user(user_id, &username).await?;
        }

        for (user_id, total, used) in self.quotas {
            setup
                .game_profile()
                .insert_quota(user_id, total, used)
                .await?;
        }

        for (user_id, name) in self.profiles {
            setup.game_profile().insert_profile(user_id, &name).await?;
        }

        // 3. Create mock endpoints, custom ones first so sequential matching works
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (token, sub, nickname, expected) in self.userinfo_endpoints {
            mocks.push(
                setup
                    .identity()
                    .create_userinfo_endpoint(&token, sub, &nickname, expected),
            );
        }

        for (token, status, expected) in self.userinfo_error_endpoints {
            mocks.push(
                setup
                    .identity()
                    .create_userinfo_error_endpoint(&token, status, expected),
            );
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};

    use super::*;

    #[tokio::test]
    async fn test_builder_creates_user_tables_with_roles() -> Result<(), TestError> {
        let test = TestBuilder::new().with_user_tables().build().await?;

        let roles = entity::prelude::Role::find().count(&test.db).await?;
        assert_eq!(roles, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_builder_chains_methods() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_game_profile_tables()
            .with_user(1, "alice")
            .with_quota(1, 2, 1)
            .with_profile(1, "alice_01")
            .build()
            .await?;

        let profiles = entity::prelude::GameProfile::find().count(&test.db).await?;
        assert_eq!(profiles, 1);

        Ok(())
    }
}
