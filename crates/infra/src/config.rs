//! Configuration loading and representation.
//!
//! Everything comes from the process environment:
//!
//! | variable | default |
//! |---|---|
//! | `EVENTTIER_BIND_ADDR` | `0.0.0.0:8080` |
//! | `JWT_SECRET` | insecure dev secret (warns) |
//! | `DATABASE_URL` | unset: in-memory seeded catalog |
//! | `EVENTTIER_UPGRADE_DELAY_MS` | `2000` |
//! | `EVENTTIER_UPGRADE_TIMEOUT_MS` | unset: no timeout |

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_UPGRADE_DELAY_MS: u64 = 2000;
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidAddr { var: &'static str, value: String },

    #[error("{var} must be a whole number of milliseconds, got {value}")]
    InvalidMillis { var: &'static str, value: String },

    #[error("{var} is set but empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    /// True when `JWT_SECRET` was missing and the dev secret is in use.
    pub jwt_secret_is_default: bool,
    pub database_url: Option<String>,
    /// Simulated processing time of a tier upgrade.
    pub upgrade_delay: Duration,
    pub upgrade_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("EVENTTIER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|_| ConfigError::InvalidAddr {
            var: "EVENTTIER_BIND_ADDR",
            value: bind_raw.clone(),
        })?;

        let (jwt_secret, jwt_secret_is_default) = match lookup("JWT_SECRET") {
            Some(s) if s.is_empty() => return Err(ConfigError::Empty { var: "JWT_SECRET" }),
            Some(s) => (s, false),
            None => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                (DEV_JWT_SECRET.to_string(), true)
            }
        };

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let upgrade_delay = parse_millis(&lookup, "EVENTTIER_UPGRADE_DELAY_MS")?
            .unwrap_or(Duration::from_millis(DEFAULT_UPGRADE_DELAY_MS));
        let upgrade_timeout = parse_millis(&lookup, "EVENTTIER_UPGRADE_TIMEOUT_MS")?;

        Ok(Self {
            bind_addr,
            jwt_secret,
            jwt_secret_is_default,
            database_url,
            upgrade_delay,
            upgrade_timeout,
        })
    }

    /// Config for tests and local tooling: in-memory stores, no upgrade delay.
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: ([127, 0, 0, 1], 0).into(),
            jwt_secret: jwt_secret.into(),
            jwt_secret_is_default: false,
            database_url: None,
            upgrade_delay: Duration::ZERO,
            upgrade_timeout: None,
        }
    }
}

fn parse_millis<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::InvalidMillis { var, value: raw }),
    }
}
