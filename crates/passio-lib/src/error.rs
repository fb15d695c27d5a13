use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Convenient result alias for the PassioGo library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a name does not resolve, or a resolved id yields nothing.
    ///
    /// `kind` names what was looked up ("transportation system",
    /// "routes for system", ...) and `query` is the caller's original input.
    #[error("{kind} '{query}' not found{}", format_suggestions(.suggestions))]
    NotFound {
        kind: String,
        query: String,
        suggestions: Vec<String>,
    },

    /// Raised when the upstream provider answers with an error payload.
    #[error("upstream {operation} failed: {message}")]
    Upstream { operation: String, message: String },

    /// Raised when an upstream fetch exceeds the configured bound.
    #[error("upstream {operation} timed out after {}s", .after.as_secs_f64())]
    Timeout { operation: String, after: Duration },

    /// Raised when a catalog file cannot be interpreted.
    #[error("invalid system catalog at {path}: {message}")]
    InvalidCatalog { path: PathBuf, message: String },

    /// Raised when an environment or CLI value cannot be parsed.
    #[error("invalid configuration for {key}: {message}")]
    InvalidConfig { key: String, message: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a not-found error without suggestions.
    pub fn not_found(kind: impl Into<String>, query: impl Into<String>) -> Self {
        Error::NotFound {
            kind: kind.into(),
            query: query.into(),
            suggestions: Vec::new(),
        }
    }

    /// Whether this error reflects the upstream provider rather than the input.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream { .. } | Error::Timeout { .. } | Error::Http(_) | Error::Json(_)
        )
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
