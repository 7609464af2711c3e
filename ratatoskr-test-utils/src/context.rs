//! Test context structure and utilities.
//!
//! `TestContext` is returned by `TestBuilder::build()` and carries the in-memory
//! SQLite database plus the mockito server standing in for the OAuth identity
//! provider.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{constant::TEST_USERINFO_PATH, error::TestError};

/// Test environment returned by `TestBuilder`.
///
/// ```ignore
/// let test = TestBuilder::new().with_game_profile_tables().build().await?;
///
/// test.user().insert_user(1, "alice").await?;
/// test.game_profile().insert_quota(1, 1, 0).await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,

    /// Mock HTTP server for the identity provider
    pub(crate) server: ServerGuard,
    /// Mock endpoints kept alive for assertion
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Convert the database and userinfo URL into any type constructible from them.
    ///
    /// Lets integration tests build the main crate's `AppState` without a circular
    /// dependency between the two crates.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, String)>,
    {
        T::from((self.db.clone(), self.userinfo_url()))
    }

    /// Full URL of the mock userinfo endpoint.
    pub fn userinfo_url(&self) -> String {
        format!("{}{}", self.server.url(), TEST_USERINFO_PATH)
    }
}

impl TestContext {
    /// Create a context with an empty in-memory database and a fresh mock server.
    ///
    /// SeaORM opens in-memory SQLite with a single pooled connection, so
    /// transactions issued by concurrent tasks run one after another.
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert every mock endpoint was called the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint's expectation was not met
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
