use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::user::UserCache, identity::IdentityClient, util::snowflake::SnowflakeGenerator,
};

/// Database and cache handles, passed explicitly to every service that needs them.
#[derive(Clone)]
pub struct Store {
    pub db: DatabaseConnection,
    pub cache: UserCache,
}

impl Store {
    pub fn new(db: DatabaseConnection, cache: UserCache) -> Self {
        Self { db, cache }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub identity: IdentityClient,
    pub snowflake: Arc<SnowflakeGenerator>,
}

/// Test construction: no cache, fixed worker id, identity provider at the given URL.
impl From<(DatabaseConnection, String)> for AppState {
    fn from((db, userinfo_url): (DatabaseConnection, String)) -> Self {
        Self {
            store: Store::new(db, UserCache::disabled()),
            identity: IdentityClient::new(userinfo_url),
            snowflake: Arc::new(SnowflakeGenerator::new(0)),
        }
    }
}
