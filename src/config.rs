use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub auth: AuthConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Settings for the upstream session subsystem that authenticates viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the authenticated username.
    pub user_header: String,
    pub login_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/social_feed.db".to_string(),
            },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            cache: CacheConfig {
                capacity: 1000,
                ttl_secs: 20,
            },
            auth: AuthConfig {
                user_header: "x-authenticated-user".to_string(),
                login_url: "/auth/login/".to_string(),
            },
            seed: SeedConfig { demo_data: false },
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
            },
            cache: CacheConfig {
                capacity: parse_var("PAGE_CACHE_CAPACITY", defaults.cache.capacity)?,
                ttl_secs: parse_var("PAGE_CACHE_TTL_SECS", defaults.cache.ttl_secs)?,
            },
            auth: AuthConfig {
                user_header: env::var("AUTH_USER_HEADER")
                    .map(|h| h.to_ascii_lowercase())
                    .unwrap_or(defaults.auth.user_header),
                login_url: env::var("AUTH_LOGIN_URL").unwrap_or(defaults.auth.login_url),
            },
            seed: SeedConfig {
                demo_data: parse_var("SEED_DEMO_DATA", defaults.seed.demo_data)?,
            },
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigurationError(format!("{} has an invalid value: {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert_eq!(config.cache.ttl(), Duration::from_secs(20));
        assert_eq!(config.auth.login_url, "/auth/login/");
        assert!(!config.seed.demo_data);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("SOCIAL_FEED_TEST_PORT", "not-a-port");
        let result: AppResult<u16> = parse_var("SOCIAL_FEED_TEST_PORT", 3000);
        assert!(matches!(result, Err(AppError::ConfigurationError(_))));
        env::remove_var("SOCIAL_FEED_TEST_PORT");

        let fallback: u16 = parse_var("SOCIAL_FEED_TEST_UNSET", 8080).unwrap();
        assert_eq!(fallback, 8080);
    }
}
