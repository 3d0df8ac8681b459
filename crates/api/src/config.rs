use std::fmt::Debug;
use std::str::FromStr;

use clai_core::pagination::{DEFAULT_PER_PAGE, MAX_PER_PAGE};

use crate::auth::jwt::JwtConfig;

/// Server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS, from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Rows per page when a listing request omits `per_page`.
    pub page_size: i64,
    pub jwt: JwtConfig,
    /// Administrator to create on first start, if configured.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the administrator account created at startup when no
/// user with the same email exists yet.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub cpf: String,
    pub email: String,
    pub password: String,
}

/// Read `key` and parse it, falling back to `default` when unset.
///
/// # Panics
///
/// Panics when the variable is set but does not parse as `T`.
pub(crate) fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e:?}")),
        Err(_) => default,
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PAGE_SIZE`            | `10`                       |
    ///
    /// The bootstrap admin is read from `BOOTSTRAP_ADMIN_CPF`,
    /// `BOOTSTRAP_ADMIN_EMAIL` and `BOOTSTRAP_ADMIN_PASSWORD` and is enabled
    /// only when all three are set.
    pub fn from_env() -> Self {
        let page_size = env_or("PAGE_SIZE", DEFAULT_PER_PAGE);
        assert!(
            (1..=MAX_PER_PAGE).contains(&page_size),
            "PAGE_SIZE must be between 1 and {MAX_PER_PAGE}"
        );

        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173".to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let bootstrap_admin = match (
            std::env::var("BOOTSTRAP_ADMIN_CPF"),
            std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
            std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(cpf), Ok(email), Ok(password)) => Some(BootstrapAdmin {
                cpf,
                email,
                password,
            }),
            _ => None,
        };

        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            page_size,
            jwt: JwtConfig::from_env(),
            bootstrap_admin,
        }
    }
}
