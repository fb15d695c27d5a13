//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `PASSIO_BASE_URL` | `https://passiogo.com` |
//! | `PASSIO_TIMEOUT_SECS` | `15` |
//! | `PASSIO_MIN_SCORE` | [`DEFAULT_MIN_SCORE`] |
//! | `PASSIO_CATALOG` | unset (fetch the system list at startup) |
//! | `PASSIO_USER_AGENT` | `passiogo-agent/1.0` |

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::resolve::DEFAULT_MIN_SCORE;

pub const BASE_URL_ENV: &str = "PASSIO_BASE_URL";
pub const TIMEOUT_ENV: &str = "PASSIO_TIMEOUT_SECS";
pub const MIN_SCORE_ENV: &str = "PASSIO_MIN_SCORE";
pub const CATALOG_ENV: &str = "PASSIO_CATALOG";
pub const USER_AGENT_ENV: &str = "PASSIO_USER_AGENT";

pub const DEFAULT_BASE_URL: &str = "https://passiogo.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_USER_AGENT: &str = "passiogo-agent/1.0";

/// Settings shared by the CLI and the MCP server.
#[derive(Debug, Clone, PartialEq)]
pub struct PassioConfig {
    pub base_url: String,
    /// Upper bound on each upstream fetch.
    pub timeout: Duration,
    /// Similarity floor for fuzzy name resolution.
    pub min_score: f64,
    /// Optional JSON catalog used instead of the provider's system list.
    pub catalog_path: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for PassioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            min_score: DEFAULT_MIN_SCORE,
            catalog_path: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl PassioConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Tests pass a closure instead of mutating the process
    /// environment so they can run in parallel.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(BASE_URL_ENV) {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = value(TIMEOUT_ENV) {
            config.timeout = parse_timeout(TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = value(MIN_SCORE_ENV) {
            config.min_score = parse_min_score(MIN_SCORE_ENV, &raw)?;
        }
        if let Some(path) = value(CATALOG_ENV) {
            config.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(agent) = value(USER_AGENT_ENV) {
            config.user_agent = agent;
        }

        Ok(config)
    }
}

/// Parse a positive number of seconds.
pub fn parse_timeout(key: &str, raw: &str) -> Result<Duration> {
    let secs: f64 = raw.trim().parse().map_err(|_| Error::InvalidConfig {
        key: key.to_string(),
        message: format!("'{}' is not a number of seconds", raw),
    })?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(Error::InvalidConfig {
            key: key.to_string(),
            message: "must be positive".to_string(),
        });
    }
    Ok(Duration::from_secs_f64(secs))
}

/// Parse a similarity floor within `0.0..=1.0`.
pub fn parse_min_score(key: &str, raw: &str) -> Result<f64> {
    let score: f64 = raw.trim().parse().map_err(|_| Error::InvalidConfig {
        key: key.to_string(),
        message: format!("'{}' is not a number", raw),
    })?;
    if !(0.0..=1.0).contains(&score) {
        return Err(Error::InvalidConfig {
            key: key.to_string(),
            message: "must be between 0.0 and 1.0".to_string(),
        });
    }
    Ok(score)
}
