//! Read-through cache of user entity fields.
//!
//! One hash per user at `<prefix>user:entity:<id>`, expiring 15 minutes after
//! the last write.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use fred::prelude::*;

use crate::server::{error::Error, model::db::UserModel};

/// Cache handle; a `None` pool disables caching entirely.
#[derive(Clone)]
pub struct UserCache {
    pool: Option<Pool>,
    prefix: String,
}

impl UserCache {
    pub const TTL_SECS: i64 = 15 * 60;

    pub fn new(pool: Option<Pool>, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    /// Cache that misses on every read and drops every write.
    pub fn disabled() -> Self {
        Self::new(None, "")
    }

    pub fn key(&self, user_id: i64) -> String {
        format!("{}user:entity:{}", self.prefix, user_id)
    }

    /// Cached user, or `None` on a miss or when the cache is disabled.
    ///
    /// # Returns
    /// - `Ok(Some(UserModel))` - Hash present and parsed
    /// - `Ok(None)` - Key absent or cache disabled
    /// - `Err(Error::RedisError)` - Command failed
    /// - `Err(Error::ParseError)` - Hash present but malformed
    pub async fn get(&self, user_id: i64) -> Result<Option<UserModel>, Error> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };

        let fields: HashMap<String, String> = pool.hgetall(self.key(user_id)).await?;
        if fields.is_empty() {
            return Ok(None);
        }

        Ok(Some(decode_user(&fields)?))
    }

    /// Write the user hash and refresh its TTL.
    pub async fn set(&self, user: &UserModel) -> Result<(), Error> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };

        let key = self.key(user.id);
        let _: () = pool.hset(&key, encode_user(user)).await?;
        let _: () = pool.expire(&key, Self::TTL_SECS, None).await?;

        Ok(())
    }

    pub async fn delete(&self, user_id: i64) -> Result<(), Error> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };

        let _: () = pool.del(self.key(user_id)).await?;

        Ok(())
    }
}

fn format_time(time: &NaiveDateTime) -> String {
    time.and_utc().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_time(field: &str, value: &str) -> Result<NaiveDateTime, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.with_timezone(&Utc).naive_utc())
        .map_err(|e| Error::ParseError(format!("user cache field {}: {}", field, e)))
}

fn encode_user(user: &UserModel) -> HashMap<String, String> {
    HashMap::from([
        ("id".to_string(), user.id.to_string()),
        ("updated_at".to_string(), format_time(&user.updated_at)),
        ("username".to_string(), user.username.clone()),
        ("email".to_string(), user.email.clone().unwrap_or_default()),
        ("phone".to_string(), user.phone.clone().unwrap_or_default()),
        (
            "role_id".to_string(),
            user.role_name.clone().unwrap_or_default(),
        ),
        ("has_ban".to_string(), user.has_ban.to_string()),
        (
            "jailed_at".to_string(),
            user.jailed_at
                .as_ref()
                .map(format_time)
                .unwrap_or_default(),
        ),
    ])
}

fn decode_user(fields: &HashMap<String, String>) -> Result<UserModel, Error> {
    let field = |name: &str| {
        fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| Error::ParseError(format!("user cache field {} missing", name)))
    };
    let optional = |name: &str| {
        fields
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    };

    let id = field("id")?
        .parse::<i64>()
        .map_err(|e| Error::ParseError(format!("user cache field id: {}", e)))?;
    let has_ban = field("has_ban")?
        .parse::<bool>()
        .map_err(|e| Error::ParseError(format!("user cache field has_ban: {}", e)))?;
    let updated_at = parse_time("updated_at", field("updated_at")?)?;
    let jailed_at = match optional("jailed_at") {
        Some(value) => Some(parse_time("jailed_at", &value)?),
        None => None,
    };

    Ok(UserModel {
        id,
        username: field("username")?.to_string(),
        email: optional("email"),
        phone: optional("phone"),
        role_name: optional("role_id"),
        has_ban,
        jailed_at,
        // Not cached; only `updated_at` travels with the hash
        created_at: updated_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user() -> UserModel {
        let now = Utc::now().naive_utc();
        UserModel {
            id: 42,
            username: "alice".to_string(),
            email: Some("alice@example.com".to_string()),
            phone: None,
            role_name: Some("PLAYER".to_string()),
            has_ban: false,
            jailed_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Expect keys to combine the prefix with the user id
    #[test]
    fn builds_prefixed_key() {
        let cache = UserCache::new(None, "ryk:");

        assert_eq!(cache.key(42), "ryk:user:entity:42");
    }

    /// Expect every cached field to survive encoding, empty strings decoding to None
    #[test]
    fn decodes_encoded_hash() {
        let user = user();

        let decoded = decode_user(&encode_user(&user)).unwrap();

        assert_eq!(decoded.id, user.id);
        assert_eq!(decoded.username, user.username);
        assert_eq!(decoded.email, user.email);
        assert_eq!(decoded.phone, None);
        assert_eq!(decoded.role_name, user.role_name);
        assert_eq!(decoded.jailed_at, user.jailed_at);
        assert_eq!(decoded.updated_at, user.updated_at);
    }

    /// Expect a hash with a malformed flag to be reported as a parse error
    #[test]
    fn rejects_malformed_hash() {
        let mut fields = encode_user(&user());
        fields.insert("has_ban".to_string(), "maybe".to_string());

        assert!(matches!(decode_user(&fields), Err(Error::ParseError(_))));
    }

    /// Expect a disabled cache to miss on read and accept writes without error
    #[tokio::test]
    async fn disabled_cache_is_a_no_op() {
        let cache = UserCache::disabled();

        cache.set(&user()).await.unwrap();

        assert!(cache.get(42).await.unwrap().is_none());
    }

    #[cfg(feature = "redis-test")]
    mod redis {
        use ratatoskr_test_utils::redis::RedisTest;

        use super::*;

        /// Expect a written user to be read back and to carry the 15 minute TTL
        #[tokio::test]
        async fn caches_user_with_ttl() -> Result<(), Error> {
            let redis = RedisTest::new().await.expect("Failed to create Redis test");
            let cache = UserCache::new(Some(redis.redis_pool.clone()), redis.prefix());
            let key = redis.key("user:entity:42");
            let user = user();

            cache.set(&user).await?;
            let cached = cache.get(42).await?;
            let ttl: i64 = redis.redis_pool.ttl(&key).await?;

            assert_eq!(cached.map(|u| u.username), Some(user.username));
            assert!(ttl > 0 && ttl <= UserCache::TTL_SECS);

            Ok(())
        }

        /// Expect a deleted user to miss afterwards
        #[tokio::test]
        async fn deletes_user() -> Result<(), Error> {
            let redis = RedisTest::new().await.expect("Failed to create Redis test");
            let cache = UserCache::new(Some(redis.redis_pool.clone()), redis.prefix());
            let _ = redis.key("user:entity:42");

            cache.set(&user()).await?;
            cache.delete(42).await?;

            assert!(cache.get(42).await?.is_none());

            Ok(())
        }
    }
}
