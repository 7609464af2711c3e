use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    cache::user::UserCache,
    config::Config,
    error::Error,
    identity::IdentityClient,
    model::app::{AppState, Store},
    service::role::RoleService,
    util::snowflake::SnowflakeGenerator,
};

/// Connect to the database, run migrations and seed the system roles
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;
    RoleService::new(&db).seed_system_roles().await?;

    Ok(db)
}

/// Connect to Valkey/Redis for the user cache
///
/// Returns a disabled cache when no `VALKEY_URL` is configured.
pub async fn connect_to_cache(config: &Config) -> Result<UserCache, Error> {
    use fred::prelude::{ClientLike, Config as RedisConfig, Pool};

    let Some(valkey_url) = &config.valkey_url else {
        tracing::info!("No VALKEY_URL configured, user cache disabled");
        return Ok(UserCache::disabled());
    };

    let redis_config = RedisConfig::from_url(valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(UserCache::new(Some(pool), config.cache_prefix.clone()))
}

/// ID generator using the configured worker id, or a random one when unset
pub fn build_snowflake(config: &Config) -> SnowflakeGenerator {
    let snowflake = match config.snowflake_worker_id {
        Some(worker_id) => SnowflakeGenerator::new(worker_id),
        None => SnowflakeGenerator::with_random_worker(),
    };

    tracing::info!(worker_id = snowflake.worker_id(), "ID generator ready");

    snowflake
}

pub fn build_identity_client(config: &Config) -> IdentityClient {
    IdentityClient::new(config.oauth_userinfo_url.clone())
}

/// Connect every collaborator and assemble the shared application state
pub async fn build_app_state(config: &Config) -> Result<AppState, Error> {
    let db = connect_to_database(config).await?;
    let cache = connect_to_cache(config).await?;

    Ok(AppState {
        store: Store::new(db, cache),
        identity: build_identity_client(config),
        snowflake: Arc::new(build_snowflake(config)),
    })
}
