use crate::TestError;
use fred::prelude::*;

/// Redis test setup with automatic cleanup
///
/// Holds a connection pool and a key prefix unique to this test instance, so
/// tests running in parallel never read each other's cache entries. Keys handed
/// out by [`RedisTest::key`] are deleted when the struct is dropped.
pub struct RedisTest {
    pub redis_pool: Pool,
    prefix: String,
    keys: std::sync::Mutex<Vec<String>>,
}

impl RedisTest {
    /// Connect to the local Redis instance and reserve a unique key prefix
    pub async fn new() -> Result<Self, TestError> {
        let redis_config = Config::from_url("redis://127.0.0.1:6379")?;
        let redis_pool = Pool::new(redis_config, None, None, None, 5)?;
        redis_pool.init().await?;

        Ok(RedisTest {
            redis_pool,
            prefix: Self::generate_unique_prefix(),
            keys: std::sync::Mutex::new(Vec::new()),
        })
    }

    /// Cache prefix reserved for this test instance
    pub fn prefix(&self) -> String {
        self.prefix.clone()
    }

    /// Full key for `suffix` under this instance's prefix, registered for cleanup
    pub fn key(&self, suffix: &str) -> String {
        let key = format!("{}{}", self.prefix, suffix);
        if let Ok(mut keys) = self.keys.lock() {
            keys.push(key.clone());
        }
        key
    }

    /// Generate a unique prefix using timestamp and thread ID
    fn generate_unique_prefix() -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();

        let thread_id = std::thread::current().id();

        let mut hasher = DefaultHasher::new();
        timestamp.hash(&mut hasher);
        thread_id.hash(&mut hasher);
        let hash = hasher.finish();

        format!("test:{}:{:x}:", timestamp, hash)
    }
}

impl Drop for RedisTest {
    fn drop(&mut self) {
        // Spawn instead of blocking to avoid "runtime within runtime" errors
        let pool = self.redis_pool.clone();
        let keys = self
            .keys
            .lock()
            .map(|keys| keys.clone())
            .unwrap_or_default();

        if keys.is_empty() {
            return;
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _: Result<(), fred::error::Error> = pool.del(keys).await;
            });
        }
    }
}
