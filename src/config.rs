/*
 * Responsibility
 * - environment / configuration loading (DATABASE_URL, CORS, auth policy)
 * - validation of required values (missing means startup failure)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: url::Url,
    // Signing algorithm allow-list; anything else is rejected at verification.
    pub auth_algorithms: Vec<Algorithm>,
    pub auth_leeway_seconds: u64,
    pub jwks_fetch_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_jwks_url = std::env::var("AUTH_JWKS_URL")
            .map_err(|_| ConfigError::Missing("AUTH_JWKS_URL"))?
            .parse::<url::Url>()
            .map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?;

        let auth_algorithms = match std::env::var("AUTH_ALGORITHMS") {
            Ok(csv) => csv
                .split(',')
                .map(|s| s.trim().parse::<Algorithm>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS"))?,
            Err(_) => vec![Algorithm::RS256],
        };
        if auth_algorithms.is_empty() {
            return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
        }

        let auth_leeway_seconds = std::env::var("AUTH_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let jwks_fetch_timeout = std::env::var("JWKS_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(3000));

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            auth_jwks_url,
            auth_algorithms,
            auth_leeway_seconds,
            jwks_fetch_timeout,
        })
    }
}
