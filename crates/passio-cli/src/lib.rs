//! PassioGo CLI library.
//!
//! This crate provides the command handlers, shared options and output
//! formatting behind the `passio-cli` binary.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use passio_lib::config::{parse_min_score, MIN_SCORE_ENV};
use passio_lib::PassioConfig;

pub mod commands;
pub mod output;
pub mod terminal;

use output::OutputFormat;

/// Options shared by every subcommand.
///
/// Flags override the matching `PASSIO_*` environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// JSON catalog of transportation systems used instead of the live list.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// PassioGo base URL.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Upper bound in seconds on each upstream request.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Similarity floor for fuzzy name matching (0.0 to 1.0).
    #[arg(long, global = true, value_name = "SCORE")]
    pub min_score: Option<String>,

    /// Log filter written to stderr, e.g. `debug` or `passio_lib=trace`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Output format for lookup results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl GlobalOptions {
    /// Build the effective configuration from the environment and flags.
    pub fn config(&self) -> Result<PassioConfig> {
        let config = PassioConfig::from_env().context("invalid PASSIO_* configuration")?;
        self.apply(config)
    }

    fn apply(&self, mut config: PassioConfig) -> Result<PassioConfig> {
        if let Some(path) = &self.catalog {
            config.catalog_path = Some(path.clone());
        }
        if let Some(url) = &self.base_url {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = self.timeout {
            anyhow::ensure!(secs > 0, "--timeout must be at least 1 second");
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = &self.min_score {
            config.min_score = parse_min_score(MIN_SCORE_ENV, raw)
                .with_context(|| format!("invalid --min-score '{}'", raw))?;
        }
        Ok(config)
    }
}

/// Configure tracing to write only to stderr.
pub fn configure_tracing(log_level: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = if let Some(level) = log_level {
        EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{}'", level))?
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    Ok(())
}
