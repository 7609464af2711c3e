use crate::server::error::config::ConfigError;

/// Runtime configuration read from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub oauth_userinfo_url: String,
    /// Cache is disabled when unset
    pub valkey_url: Option<String>,
    pub cache_prefix: String,
    pub host: String,
    pub port: u16,
    /// Random worker id is drawn at startup when unset
    pub snowflake_worker_id: Option<u8>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub const DEFAULT_CACHE_PREFIX: &'static str = "ryk:";
    pub const DEFAULT_HOST: &'static str = "localhost";
    pub const DEFAULT_PORT: u16 = 5566;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let required =
            |var: &str| get(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()));

        let port = match get("PORT") {
            Some(value) => parse_var("PORT", &value)?,
            None => Self::DEFAULT_PORT,
        };

        let snowflake_worker_id = match get("SNOWFLAKE_WORKER_ID") {
            Some(value) => {
                let worker_id: u8 = parse_var("SNOWFLAKE_WORKER_ID", &value)?;
                if worker_id > 63 {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "SNOWFLAKE_WORKER_ID".to_string(),
                        reason: format!("{} is out of range 0-63", worker_id),
                    });
                }
                Some(worker_id)
            }
            None => None,
        };

        let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = parse_var("REQUEST_TIMEOUT_SECS", &value)?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "REQUEST_TIMEOUT_SECS".to_string(),
                        reason: "must be greater than 0".to_string(),
                    });
                }
                secs
            }
            None => Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oauth_userinfo_url: required("OAUTH_USERINFO_URL")?,
            valkey_url: get("VALKEY_URL"),
            cache_prefix: get("CACHE_PREFIX")
                .unwrap_or_else(|| Self::DEFAULT_CACHE_PREFIX.to_string()),
            host: get("HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string()),
            port,
            snowflake_worker_id,
            request_timeout_secs,
        })
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        })
}
