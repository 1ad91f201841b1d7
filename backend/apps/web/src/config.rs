//! Environment configuration
//!
//! Everything the binary reads from the environment (or `.env`), resolved
//! once at startup. Missing required values are fatal.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, bail};
use auth::{AuthConfig, GoogleConfig};
use platform::password::HashingParams;
use sqlx::postgres::PgConnectOptions;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000/auth/google/secrets";

/// Startup settings
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub database: PgConnectOptions,
    pub auth: AuthConfig,
    pub google: GoogleConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let development = cfg!(debug_assertions);

        let bind_addr = parse_var(
            "BIND_ADDR",
            var("BIND_ADDR"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>()?,
        )?;

        Ok(Self {
            bind_addr,
            database: database_options()?,
            auth: auth_config(development)?,
            google: GoogleConfig {
                client_id: env::var("GOOGLE_CLIENT_ID").context("GOOGLE_CLIENT_ID must be set")?,
                client_secret: env::var("GOOGLE_CLIENT_SECRET")
                    .context("GOOGLE_CLIENT_SECRET must be set")?,
                redirect_url: var("GOOGLE_CALLBACK_URL")
                    .unwrap_or_else(|| DEFAULT_CALLBACK_URL.to_string()),
            },
        })
    }
}

/// `DATABASE_URL` wins; otherwise the connection is assembled from `PG_*`
fn database_options() -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = var("DATABASE_URL") {
        return PgConnectOptions::from_str(&url).context("DATABASE_URL is not a valid Postgres URL");
    }

    let mut options = PgConnectOptions::new()
        .host(&var("PG_HOST").unwrap_or_else(|| "localhost".to_string()))
        .port(parse_var("PG_PORT", var("PG_PORT"), 5432u16)?)
        .username(&var("PG_USER").unwrap_or_else(|| "postgres".to_string()))
        .database(&var("PG_DATABASE").unwrap_or_else(|| "secrets".to_string()));

    if let Some(password) = var("PG_PASSWORD") {
        options = options.password(&password);
    }

    Ok(options)
}

fn auth_config(development: bool) -> anyhow::Result<AuthConfig> {
    let mut config = match var("SESSION_SECRET") {
        Some(secret) => AuthConfig::from_secret(&secret),
        None if development => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
            AuthConfig::with_random_secret()
        }
        None => bail!("SESSION_SECRET must be set in production"),
    };

    // Plain HTTP during local development
    config.cookie_secure = !development;

    let defaults = HashingParams::default();
    config.hashing = HashingParams {
        memory_kib: parse_var(
            "PASSWORD_HASH_MEMORY_KIB",
            var("PASSWORD_HASH_MEMORY_KIB"),
            defaults.memory_kib,
        )?,
        iterations: parse_var(
            "PASSWORD_HASH_ITERATIONS",
            var("PASSWORD_HASH_ITERATIONS"),
            defaults.iterations,
        )?,
        parallelism: parse_var(
            "PASSWORD_HASH_PARALLELISM",
            var("PASSWORD_HASH_PARALLELISM"),
            defaults.parallelism,
        )?,
    };

    config.password_pepper = var("PASSWORD_PEPPER").map(String::into_bytes);

    Ok(config)
}

/// Non-empty environment variable
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(key: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}
