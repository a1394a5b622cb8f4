//! Server Configuration
//!
//! Read once from the environment (after `.env` is loaded) and passed
//! explicitly into the domain crates.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use platform::password::HashCost;
use platform::store::DEFAULT_STORE_TIMEOUT;
use platform::token::{DEFAULT_TOKEN_LIFETIME, TokenConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory store
    pub database_url: Option<String>,
    pub auth: AuthConfig,
    /// Bound on every persistence call
    pub store_timeout: Duration,
    pub frontend_origins: Vec<HeaderValue>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// `development` allows a random signing secret when `JWT_SECRET` is unset
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        development: bool,
    ) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let token_lifetime = match var("TOKEN_LIFETIME_SECS") {
            Some(v) => Duration::from_secs(v.parse().context("TOKEN_LIFETIME_SECS must be an integer")?),
            None => DEFAULT_TOKEN_LIFETIME,
        };

        let token = match var("JWT_SECRET") {
            Some(secret) => TokenConfig::new(secret.into_bytes()),
            None if development => {
                tracing::warn!("JWT_SECRET not set, using a random secret; tokens will not survive a restart");
                TokenConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set in production"),
        }
        .with_lifetime(token_lifetime);

        if !token.has_strong_secret() {
            tracing::warn!("JWT_SECRET is shorter than 32 bytes");
        }

        let defaults = HashCost::default();
        let hash_cost = HashCost {
            memory_kib: parse_or(&var, "HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&var, "HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&var, "HASH_PARALLELISM", defaults.parallelism)?,
        };

        let password_pepper = var("PASSWORD_PEPPER")
            .map(|b64| general_purpose::STANDARD.decode(b64.trim()))
            .transpose()
            .context("PASSWORD_PEPPER must be base64")?;

        let store_timeout = match var("STORE_TIMEOUT_MS") {
            Some(v) => Duration::from_millis(v.parse().context("STORE_TIMEOUT_MS must be an integer")?),
            None => DEFAULT_STORE_TIMEOUT,
        };

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: var("DATABASE_URL"),
            auth: AuthConfig {
                token,
                hash_cost,
                password_pepper,
            },
            store_timeout,
            frontend_origins,
        })
    }
}

fn parse_or<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(v) => v.parse().with_context(|| format!("{key} is invalid")),
        None => Ok(default),
    }
}
